use crate::domain::model::{DraftEntry, MedalWeights, RawRow, ScoreboardResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_path(&self) -> &str;
    /// The static draft assignment: participant → owned countries.
    fn draft(&self) -> &[DraftEntry];
    fn weights(&self) -> MedalWeights;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRow>>;
    async fn transform(&self, rows: Vec<RawRow>) -> Result<ScoreboardResult>;
    async fn load(&self, result: ScoreboardResult) -> Result<String>;
}

use crate::core::Pipeline;
use crate::domain::model::ScoreboardResult;
use crate::utils::error::Result;

pub struct DraftEngine<P: Pipeline> {
    pipeline: P,
}

/// What a completed run hands back to the caller: where the archive went,
/// plus the result itself for rendering.
#[derive(Debug)]
pub struct RunSummary {
    pub output_path: String,
    pub result: ScoreboardResult,
}

impl<P: Pipeline> DraftEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting medal-draft pipeline");

        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} table rows", rows.len());

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Scored {} participants over {} country records",
            result.scoreboard.len(),
            result.record_count
        );

        let output_path = self.pipeline.load(result.clone()).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            result,
        })
    }
}

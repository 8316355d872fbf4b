use crate::core::{countries, html, rank, score, table};
use crate::core::{ConfigProvider, Pipeline, RawRow, Storage};
use crate::domain::model::{MedalRecord, RankedParticipant, ScoreboardResult};
use crate::utils::error::{DraftError, Result};
use chrono::Utc;
use reqwest::Client;
use std::io::Write;
use std::time::Duration;
use zip::write::{FileOptions, ZipWriter};

/// Name of the output archive written through the storage port.
pub const OUTPUT_ARCHIVE: &str = "draft_output.zip";

pub struct ScoreboardPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ScoreboardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScoreboardPipeline<S, C> {
    /// Fetch the source document and reduce its medal table to raw rows.
    /// The transform core never sees markup.
    async fn extract(&self) -> Result<Vec<RawRow>> {
        tracing::debug!("Fetching medal table from: {}", self.config.source_url());
        let response = self
            .client
            .get(self.config.source_url())
            .timeout(Duration::from_secs(self.config.timeout_seconds()))
            .send()
            .await?;

        tracing::debug!("Source response status: {}", response.status());
        let body = response.error_for_status()?.text().await?;

        let rows = html::extract_table_rows(&body)?;
        tracing::debug!("Extracted {} raw rows", rows.len());
        Ok(rows)
    }

    /// Pure over its input: normalize rows, aggregate the draft, rank.
    async fn transform(&self, rows: Vec<RawRow>) -> Result<ScoreboardResult> {
        let records = table::normalize_table(&rows);
        if records.is_empty() {
            tracing::warn!("Source table produced no country records");
        }

        let draft = self.config.draft();
        let scores = score::aggregate(&records, draft, self.config.weights());
        let scoreboard = rank::rank_participants(scores);
        let standings = score::drafted_standings(&records, draft);

        Ok(ScoreboardResult {
            scoreboard,
            standings,
            record_count: records.len(),
            fetched_at: Utc::now(),
        })
    }

    /// Write scoreboard + standings as CSV and the full result as JSON,
    /// bundled in one zip archive.
    async fn load(&self, result: ScoreboardResult) -> Result<String> {
        let scoreboard_csv = scoreboard_csv(&result.scoreboard)?;
        let standings_csv = standings_csv(&result.standings)?;
        let json_output = serde_json::to_vec_pretty(&result)?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("scoreboard.csv", FileOptions::default())?;
            zip.write_all(&scoreboard_csv)?;

            zip.start_file::<_, ()>("standings.csv", FileOptions::default())?;
            zip.write_all(&standings_csv)?;

            zip.start_file::<_, ()>("scoreboard.json", FileOptions::default())?;
            zip.write_all(&json_output)?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing archive ({} bytes) to storage", zip_data.len());
        self.storage.write_file(OUTPUT_ARCHIVE, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), OUTPUT_ARCHIVE))
    }
}

fn scoreboard_csv(rows: &[RankedParticipant]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "participant", "gold", "silver", "bronze", "total", "score"])?;
    for row in rows {
        let s = &row.score;
        wtr.write_record([
            row.rank.to_string(),
            s.participant.clone(),
            s.gold.to_string(),
            s.silver.to_string(),
            s.bronze.to_string(),
            s.total.to_string(),
            s.score.to_string(),
        ])?;
    }
    wtr.into_inner().map_err(|e| DraftError::Io(e.into_error()))
}

fn standings_csv(records: &[MedalRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "country", "ioc", "gold", "silver", "bronze", "total"])?;
    for record in records {
        wtr.write_record([
            record.rank.clone(),
            record.country.clone(),
            countries::ioc_code(&record.country).unwrap_or("").to_string(),
            record.gold.to_string(),
            record.silver.to_string(),
            record.bronze.to_string(),
            record.total.to_string(),
        ])?;
    }
    wtr.into_inner().map_err(|e| DraftError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DraftEntry, MedalWeights};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DraftError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        source_url: String,
        output_path: String,
        draft: Vec<DraftEntry>,
    }

    impl MockConfig {
        fn new(source_url: String) -> Self {
            Self {
                source_url,
                output_path: "test_output".to_string(),
                draft: vec![
                    DraftEntry {
                        participant: "Mike".to_string(),
                        countries: vec!["Norway".to_string(), "Sweden".to_string()],
                    },
                    DraftEntry {
                        participant: "Ann".to_string(),
                        countries: vec!["Wakanda".to_string()],
                    },
                ],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn source_url(&self) -> &str {
            &self.source_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn draft(&self) -> &[DraftEntry] {
            &self.draft
        }

        fn weights(&self) -> MedalWeights {
            MedalWeights::default()
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }
    }

    const TABLE_HTML: &str = r#"
    <table class="wikitable">
      <tr><th>Rank</th><th>NOC</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
      <tr><td>1</td><td>Norway</td><td>5</td><td>3</td><td>2</td><td>10</td></tr>
      <tr><td>2</td><td>Sweden</td><td>1</td><td>0</td><td>0</td><td>1</td></tr>
      <tr><td>3</td><td>Denmark</td><td>0</td><td>1</td><td>0</td><td>1</td></tr>
    </table>
    "#;

    #[tokio::test]
    async fn test_extract_reduces_table_to_rows() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/medals");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(format!("<html><body>{}</body></html>", TABLE_HTML));
        });

        let pipeline = ScoreboardPipeline::new(MockStorage::new(), MockConfig::new(server.url("/medals")));
        let rows = pipeline.extract().await.unwrap();

        page_mock.assert();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cell(RawRow::COUNTRY), "Norway");
        assert_eq!(rows[2].cell(RawRow::COUNTRY), "Denmark");
    }

    #[tokio::test]
    async fn test_extract_http_error_fails() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/medals");
            then.status(503);
        });

        let pipeline = ScoreboardPipeline::new(MockStorage::new(), MockConfig::new(server.url("/medals")));
        assert!(pipeline.extract().await.is_err());
        page_mock.assert();
    }

    #[tokio::test]
    async fn test_extract_document_without_table_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/medals");
            then.status(200).body("<html><body>maintenance</body></html>");
        });

        let pipeline = ScoreboardPipeline::new(MockStorage::new(), MockConfig::new(server.url("/medals")));
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, DraftError::Table { .. }));
    }

    #[tokio::test]
    async fn test_transform_scores_and_ranks() {
        let pipeline = ScoreboardPipeline::new(
            MockStorage::new(),
            MockConfig::new("http://test.invalid".to_string()),
        );

        let rows = vec![
            RawRow::from(["1", "Norway", "5", "3", "2", "10"]),
            RawRow::from(["2", "Sweden", "1", "0", "0", "1"]),
        ];
        let result = pipeline.transform(rows).await.unwrap();

        assert_eq!(result.record_count, 2);
        assert_eq!(result.scoreboard.len(), 2);

        let mike = &result.scoreboard[0];
        assert_eq!(mike.score.participant, "Mike");
        assert_eq!(mike.rank, 1);
        assert_eq!(mike.score.score, 26);
        assert_eq!(mike.score.total, 11);

        let ann = &result.scoreboard[1];
        assert_eq!(ann.score.participant, "Ann");
        assert_eq!(ann.rank, 2);
        assert_eq!(ann.score.score, 0);

        // Standings keep only drafted countries, in table order.
        let countries: Vec<&str> = result.standings.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Norway", "Sweden"]);
    }

    #[tokio::test]
    async fn test_transform_empty_rows_zero_scores() {
        let pipeline = ScoreboardPipeline::new(
            MockStorage::new(),
            MockConfig::new("http://test.invalid".to_string()),
        );

        let result = pipeline.transform(Vec::new()).await.unwrap();
        assert_eq!(result.record_count, 0);
        assert_eq!(result.scoreboard.len(), 2);
        assert!(result.scoreboard.iter().all(|r| r.score.score == 0));
        assert!(result.scoreboard.iter().all(|r| r.rank == 1));
    }

    #[tokio::test]
    async fn test_load_writes_archive_with_three_files() {
        let storage = MockStorage::new();
        let pipeline = ScoreboardPipeline::new(
            storage.clone(),
            MockConfig::new("http://test.invalid".to_string()),
        );

        let rows = vec![RawRow::from(["1", "Norway", "5", "3", "2", "10"])];
        let result = pipeline.transform(rows).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "test_output/draft_output.zip");

        let zip_data = storage.get_file(OUTPUT_ARCHIVE).await.unwrap();
        let cursor = std::io::Cursor::new(zip_data);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        assert_eq!(archive.len(), 3);

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["scoreboard.csv", "scoreboard.json", "standings.csv"]);

        let scoreboard = {
            let mut file = archive.by_name("scoreboard.csv").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        assert!(scoreboard.starts_with("rank,participant,gold,silver,bronze,total,score"));
        assert!(scoreboard.contains("1,Mike,5,3,2,10,23"));
        assert!(scoreboard.contains("2,Ann,0,0,0,0,0"));

        let standings = {
            let mut file = archive.by_name("standings.csv").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        assert!(standings.contains("1,Norway,NOR,5,3,2,10"));
    }
}

use crate::config::draft::DraftConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "medal-draft")]
#[command(about = "Scrape a public medal table and score a fixed country draft")]
pub struct CliConfig {
    /// TOML config file with the draft assignment. Built-in family draft
    /// when omitted.
    #[arg(long)]
    pub config: Option<String>,

    /// Override the source document URL.
    #[arg(long)]
    pub source_url: Option<String>,

    /// Override the output directory.
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolve the effective configuration: file (or defaults) plus CLI
    /// overrides.
    pub fn load_config(&self) -> Result<DraftConfig> {
        let mut config = match &self.config {
            Some(path) => DraftConfig::from_file(path)?,
            None => DraftConfig::default(),
        };

        if let Some(url) = &self.source_url {
            config.source.endpoint = url.clone();
        }
        if let Some(path) = &self.output_path {
            config.load.output_path = path.clone();
        }

        Ok(config)
    }
}

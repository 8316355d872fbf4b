pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{DraftConfig, LocalStorage};

pub use crate::core::etl::{DraftEngine, RunSummary};
pub use crate::core::pipeline::ScoreboardPipeline;
pub use domain::model::{
    DraftEntry, MedalRecord, MedalWeights, ParticipantScore, RankedParticipant, RawRow,
    ScoreboardResult,
};
pub use utils::error::{DraftError, Result};

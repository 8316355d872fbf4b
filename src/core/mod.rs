pub mod countries;
pub mod etl;
pub mod html;
pub mod pipeline;
pub mod rank;
pub mod score;
pub mod table;

pub use crate::domain::model::{
    DraftEntry, MedalRecord, MedalTally, MedalWeights, ParticipantScore, RankedParticipant, RawRow,
    ScoreboardResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

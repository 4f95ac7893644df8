pub mod ai;
pub mod core;
pub mod data;
pub mod error;

pub use crate::ai::palace::{CategoryCounts, HpTier, PalaceEngine, ProbabilityResult, TierProbabilities};
pub use crate::core::{
    alarms::{alarm_labels, is_alarming, AlarmLabel},
    set_parser::{parse_set, ParsedSet},
    stats::{parse_effort_value, SpeedSummary, StatCalculator},
};
pub use crate::data::{
    move_classes::{MoveCategory, MoveClassTable},
    natures::{NatureTable, NatureWeightProfile},
    species::{BaseStats, SpeciesData, SpeciesDatabase, Stat},
    PalaceTables,
};
pub use crate::error::{DataError, PalaceError};

#[cfg(target_arch = "wasm32")]
pub mod wasm;

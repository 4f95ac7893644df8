pub mod palace;

pub use palace::{HpTier, PalaceEngine, ProbabilityResult, TierProbabilities};

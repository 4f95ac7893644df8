//! Error types for the Palace calculator.
//!
//! Lookups that fail on user-entered text (`PalaceError`) are expected and
//! recoverable; callers usually turn them into a message next to the form.
//! Table loading failures (`DataError`) only happen while building the
//! static tables, before any computation runs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PalaceError {
    /// The nature name is not a key of the nature-weight table.
    #[error("Unknown nature: {0}")]
    UnknownNature(String),

    /// The species has no entry in the base-stat table.
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// The export text had no non-blank lines.
    #[error("Set text is empty")]
    EmptyInput,
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A nature row carried a negative or non-finite weight.
    #[error("Invalid weights for nature '{nature}'")]
    InvalidWeights { nature: String },
}

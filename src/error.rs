//! Error taxonomy for the variant scoring pipeline
//!
//! Every stage fails fast: errors are raised where they are detected and
//! propagated with `?` to the caller of the run. Nothing in the pipeline
//! retries or partially recovers.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required raw, derived, encoded or exported columns are absent.
    /// `missing` always holds the complete list, never just the first hit.
    #[error("{stage}: missing required column(s): {}", .missing.join(", "))]
    Schema { stage: &'static str, missing: Vec<String> },

    /// Feature table lacks columns the classifier requires
    #[error("missing required predict column(s): {}", .missing.join(", "))]
    PredictionSchema { missing: Vec<String> },

    /// A transformer property received a value of the wrong type at construction
    #[error("transformer '{transformer}': property '{property}' expected {expected} but got {found}")]
    TypeViolation {
        transformer: String,
        property: String,
        expected: &'static str,
        found: String,
    },

    /// A numeric annotation field could not be parsed
    #[error("column '{column}': cannot parse '{value}' as a number")]
    Parse { column: String, value: String },

    /// Loaded table fails a basic sanity check (no rows, too few columns, gaps)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Classifier contract or output problems
    #[error("model error: {0}")]
    Model(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Missing column names carried by schema-type errors
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            PipelineError::Schema { missing, .. } | PipelineError::PredictionSchema { missing } => {
                Some(missing)
            }
            _ => None,
        }
    }
}

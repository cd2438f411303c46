//! Schema Validation Gates
//!
//! Stateless checks run between stages. Every gate collects the complete
//! list of missing columns before failing, in the order they were required.

use crate::error::{PipelineError, Result};
use crate::schema::column;
use crate::utils::missing_columns;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::error;

/// Fewest columns a loaded table can have and still hold a variant
const MIN_COLUMNS: usize = 4;

fn schema_gate<S: AsRef<str>>(df: &DataFrame, stage: &'static str, required: &[S]) -> Result<()> {
    let missing = missing_columns(df, required);
    if missing.is_empty() {
        return Ok(());
    }
    error!("{}: missing required column(s): {}", stage, missing.join(", "));
    Err(PipelineError::Schema { stage, missing })
}

/// Pre-transform gate: canonical columns after normalization
pub fn validate_raw_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<()> {
    schema_gate(df, "pre-transform", required)
}

/// Post-transform gate: every column the model derives from annotator fields
pub fn validate_derived_columns(
    df: &DataFrame,
    vep_features: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    let required: Vec<&str> = vep_features
        .values()
        .flatten()
        .map(|c| c.as_str())
        .collect();
    schema_gate(df, "post-transform", &required)
}

/// Predict gate: every model feature must be present
pub fn validate_predict_ready<S: AsRef<str>>(df: &DataFrame, feature_names: &[S]) -> Result<()> {
    let missing = missing_columns(df, feature_names);
    if missing.is_empty() {
        return Ok(());
    }
    error!("missing required predict column(s): {}", missing.join(", "));
    Err(PipelineError::PredictionSchema { missing })
}

pub fn validate_variants_present(df: &DataFrame) -> Result<()> {
    if df.height() == 0 {
        return Err(invalid_input("input contains no variants".to_string()));
    }
    Ok(())
}

/// A table with fewer columns than a bare VCF record was not parsed
/// with the right separator.
pub fn validate_n_columns(df: &DataFrame) -> Result<()> {
    if df.width() < MIN_COLUMNS {
        return Err(invalid_input(format!(
            "expected at least {} columns, found {}; is the file tab-separated?",
            MIN_COLUMNS,
            df.width()
        )));
    }
    Ok(())
}

/// Every record needs a chromosome and position
pub fn validate_chrom_pos(df: &DataFrame) -> Result<()> {
    schema_gate(df, "pre-transform", &[column::CHR, column::POS])?;

    let mut gaps = Vec::new();
    for name in [column::CHR, column::POS] {
        let nulls = df.column(name)?.null_count();
        if nulls > 0 {
            gaps.push(format!("{} ({} null)", name, nulls));
        }
    }
    if !gaps.is_empty() {
        return Err(invalid_input(format!("missing values in {}", gaps.join(", "))));
    }
    Ok(())
}

pub(crate) fn invalid_input(message: String) -> PipelineError {
    error!("{}", message);
    PipelineError::InvalidInput(message)
}

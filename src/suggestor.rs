//! Class Suggestion
//!
//! Attaches a `suggested_class` to every scored row. Per-gene thresholds are
//! not decided here: the default policy marks everything as a variant of
//! uncertain significance, and callers plug in their own `SuggestionPolicy`.

use crate::error::{PipelineError, Result};
use crate::schema::column;
use crate::utils::{float_values, missing_columns, string_values};
use polars::prelude::*;
use std::fmt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputClass {
    Vus,
    Tolerated,
    LikelyTolerated,
    LikelyDamaging,
    Damaging,
}

impl OutputClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputClass::Vus => "VUS",
            OutputClass::Tolerated => "Tolerated",
            OutputClass::LikelyTolerated => "Likely tolerated",
            OutputClass::LikelyDamaging => "Likely damaging",
            OutputClass::Damaging => "Damaging",
        }
    }
}

impl fmt::Display for OutputClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the class of one scored record
pub trait SuggestionPolicy {
    fn suggest(&self, score: Option<f64>, gene_name: Option<&str>) -> OutputClass;
}

/// Every record is a VUS
#[derive(Debug, Default, Clone, Copy)]
pub struct UncertainPolicy;

impl SuggestionPolicy for UncertainPolicy {
    fn suggest(&self, _score: Option<f64>, _gene_name: Option<&str>) -> OutputClass {
        OutputClass::Vus
    }
}

pub struct ClassSuggestor {
    policy: Box<dyn SuggestionPolicy>,
}

impl Default for ClassSuggestor {
    fn default() -> Self {
        Self::new(Box::new(UncertainPolicy))
    }
}

impl ClassSuggestor {
    pub fn new(policy: Box<dyn SuggestionPolicy>) -> Self {
        Self { policy }
    }

    pub fn apply(&self, mut df: DataFrame) -> Result<DataFrame> {
        let missing = missing_columns(&df, &[column::SCORE, column::GENE_NAME]);
        if !missing.is_empty() {
            error!("suggest: missing required column(s): {}", missing.join(", "));
            return Err(PipelineError::Schema { stage: "suggest", missing });
        }

        let scores = float_values(&df, column::SCORE)?;
        let genes = string_values(&df, column::GENE_NAME)?;
        let classes: Vec<&str> = (&scores)
            .into_iter()
            .zip(&genes)
            .map(|(score, gene)| self.policy.suggest(score, gene).as_str())
            .collect();

        df.with_column(Series::new(column::SUGGESTED_CLASS.into(), classes))?;
        info!("suggested classes for {} variant(s)", df.height());
        Ok(df)
    }
}

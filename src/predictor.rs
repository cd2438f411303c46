//! Predictor: scores each row with the classifier's positive-class probability

use crate::error::{PipelineError, Result};
use crate::model::Classifier;
use crate::schema::column;
use crate::validators::validate_predict_ready;
use polars::prelude::*;
use tracing::info;

pub struct Predictor<'a> {
    model: &'a dyn Classifier,
}

impl<'a> Predictor<'a> {
    pub fn new(model: &'a dyn Classifier) -> Self {
        Self { model }
    }

    /// Attach a Float64 `score` column; all other columns are left as they are
    pub fn predict(&self, mut df: DataFrame) -> Result<DataFrame> {
        let feature_names = self.model.feature_names();
        validate_predict_ready(&df, feature_names)?;

        let features = df.select(feature_names.iter().map(|s| s.as_str()))?;
        let probabilities = self.model.predict_proba(&features)?;
        if probabilities.len() != df.height() {
            return Err(PipelineError::Model(format!(
                "classifier returned {} probabilities for {} rows",
                probabilities.len(),
                df.height()
            )));
        }

        let scores: Vec<f64> = probabilities.iter().map(|p| p[1]).collect();
        df.with_column(Series::new(column::SCORE.into(), scores))?;

        info!("scored {} variant(s)", df.height());
        Ok(df)
    }
}

//! Variant Scorer - Main coordinator for scoring annotated variants
//!
//! Runs the stages in order, handing the table from one to the next:
//! normalize → post-parse checks → raw validation → transform →
//! derived validation → categorical encoding → predict → suggest.

use crate::categorical::CategoricalEncoder;
use crate::config::PipelineConfig;
use crate::context::RunContext;
use crate::data::VariantTable;
use crate::error::Result;
use crate::model::{validate_versions_compatible, Classifier};
use crate::normalizer::ColumnNormalizer;
use crate::pipeline::{TransformReport, TransformerPipeline};
use crate::predictor::Predictor;
use crate::schema::required_raw_columns;
use crate::suggestor::ClassSuggestor;
use crate::validators::{
    validate_chrom_pos, validate_derived_columns, validate_n_columns, validate_raw_columns,
    validate_variants_present,
};
use tracing::info;

/// Version of this framework, checked against every model's version
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main variant scorer
pub struct VariantScorer<M: Classifier> {
    model: M,
    pipeline: TransformerPipeline,
    encoder: CategoricalEncoder,
    suggestor: ClassSuggestor,
}

impl<M: Classifier> VariantScorer<M> {
    /// Initialize the scorer
    ///
    /// Fails if the model version is incompatible with this framework or a
    /// transformer override in `config` is malformed.
    pub fn new(model: M, config: &PipelineConfig) -> Result<Self> {
        validate_versions_compatible(FRAMEWORK_VERSION, model.model_version())?;
        let pipeline = TransformerPipeline::from_config(config)?;

        info!(
            "variant scorer initialized: model {}, {} features, {} transformers",
            model.model_version(),
            model.feature_names().len(),
            pipeline.transformers().len()
        );

        Ok(Self {
            model,
            pipeline,
            encoder: CategoricalEncoder::new(),
            suggestor: ClassSuggestor::default(),
        })
    }

    /// Replace the default (all-VUS) class suggestion
    pub fn with_suggestor(mut self, suggestor: ClassSuggestor) -> Self {
        self.suggestor = suggestor;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn pipeline(&self) -> &TransformerPipeline {
        &self.pipeline
    }

    /// Transform and check derived columns, without predicting
    pub fn transform_only(
        &self,
        table: VariantTable,
        ctx: &RunContext,
    ) -> Result<(VariantTable, TransformReport)> {
        let (table, report) = transform_table(&self.pipeline, table, ctx)?;
        let _guard = ctx.enter();
        validate_derived_columns(&table, self.model.vep_features())?;
        Ok((table, report))
    }

    /// Full run: returns the input table with `score` and `suggested_class`
    pub fn score(&self, table: VariantTable, ctx: &RunContext) -> Result<VariantTable> {
        let (mut table, _report) = self.transform_only(table, ctx)?;

        let _guard = ctx.enter();
        self.encoder.encode(&mut table, self.model.processable_features())?;
        let table = Predictor::new(&self.model).predict(table)?;
        let table = self.suggestor.apply(table)?;

        info!("scoring run complete: {} variant(s)", table.height());
        Ok(table)
    }
}

/// Normalize, sanity-check and transform a freshly loaded table
pub fn transform_table(
    pipeline: &TransformerPipeline,
    mut table: VariantTable,
    ctx: &RunContext,
) -> Result<(VariantTable, TransformReport)> {
    let _guard = ctx.enter();

    ColumnNormalizer::new().normalize(&mut table)?;
    validate_variants_present(&table)?;
    validate_n_columns(&table)?;
    // full missing list first; chr/pos null checks assume both columns exist
    validate_raw_columns(&table, &required_raw_columns())?;
    validate_chrom_pos(&table)?;

    let report = pipeline.process(&mut table)?;
    Ok((table, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::model::ModelFeatureContract;
    use polars::prelude::*;
    use std::collections::BTreeMap;

    struct VersionedModel(ModelFeatureContract);

    impl Classifier for VersionedModel {
        fn contract(&self) -> &ModelFeatureContract {
            &self.0
        }

        fn predict_proba(&self, features: &DataFrame) -> Result<Vec<[f64; 2]>> {
            Ok(vec![[0.5, 0.5]; features.height()])
        }
    }

    fn model(version: &str) -> VersionedModel {
        VersionedModel(ModelFeatureContract {
            model_version: version.to_string(),
            feature_names: vec!["Length".to_string()],
            vep_features: BTreeMap::new(),
            processable_features: BTreeMap::new(),
        })
    }

    #[test]
    fn test_framework_version_is_semantic() {
        assert!(validate_versions_compatible(FRAMEWORK_VERSION, FRAMEWORK_VERSION).is_ok());
    }

    #[test]
    fn test_incompatible_model_rejected() {
        let result = VariantScorer::new(model("99.0.0"), &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::Model(_))));
    }

    #[test]
    fn test_compatible_model_accepted() {
        let scorer = VariantScorer::new(model(FRAMEWORK_VERSION), &PipelineConfig::default()).unwrap();
        assert_eq!(scorer.model().feature_names(), &["Length".to_string()]);
    }

    #[test]
    fn test_transform_table_rejects_narrow_input() {
        let pipeline = TransformerPipeline::from_config(&PipelineConfig::default()).unwrap();
        let df = df!["CHROM" => &["1"], "POS" => &[1i64]].unwrap();
        let err = transform_table(&pipeline, df, &RunContext::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }
}

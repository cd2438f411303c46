//! Transformer Pipeline
//!
//! Applies every usable transformer to the normalized table. Source columns
//! are dropped only after all transformers ran, since several transformers
//! may read the same source (`REF` feeds both `Type` and `Length`).

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::transformers::{Transformer, TransformerKind};
use crate::utils::has_column;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// What a pipeline run did to the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Source column → columns derived from it
    pub processed: BTreeMap<String, Vec<String>>,
    /// Source columns removed after transformation
    pub dropped: Vec<String>,
    /// Source columns absent from the table
    pub skipped: Vec<String>,
}

pub struct TransformerPipeline {
    transformers: Vec<Transformer>,
}

impl TransformerPipeline {
    /// Build from the full registry, applying config overrides.
    /// Unusable transformers are left out entirely.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let mut transformers = Vec::with_capacity(TransformerKind::ALL.len());
        for kind in TransformerKind::ALL {
            let transformer =
                Transformer::with_overrides(kind, config.transformer_override(kind.label()))?;
            if transformer.usable() {
                transformers.push(transformer);
            } else {
                debug!("transformer {} disabled", kind.label());
            }
        }
        Ok(Self { transformers })
    }

    pub fn with_transformers(transformers: Vec<Transformer>) -> Self {
        Self { transformers: transformers.into_iter().filter(|t| t.usable()).collect() }
    }

    pub fn transformers(&self) -> &[Transformer] {
        &self.transformers
    }

    /// Every column this pipeline can produce, in application order
    pub fn output_columns(&self) -> Vec<&str> {
        self.transformers
            .iter()
            .flat_map(|t| t.columns().iter().map(|c| c.as_str()))
            .collect()
    }

    pub fn process(&self, df: &mut DataFrame) -> Result<TransformReport> {
        let mut report = TransformReport::default();
        let mut to_drop: Vec<&str> = Vec::new();

        for transformer in &self.transformers {
            let source = transformer.name();
            if !has_column(df, source) {
                warn!(
                    "source column '{}' not found, skipping {}",
                    source,
                    transformer.kind().label()
                );
                if !report.skipped.iter().any(|s| s == source) {
                    report.skipped.push(source.to_string());
                }
                continue;
            }

            debug!("applying {} to '{}'", transformer.kind().label(), source);
            transformer.process(df)?;

            report
                .processed
                .entry(source.to_string())
                .or_default()
                .extend(transformer.columns().iter().cloned());

            if transformer.drop() && !to_drop.contains(&source) {
                to_drop.push(source);
            }
        }

        for source in to_drop {
            // an output column may reuse its source name
            let overwritten = self
                .transformers
                .iter()
                .any(|t| t.columns().iter().any(|c| c == source));
            if overwritten {
                continue;
            }
            df.drop_in_place(source)?;
            report.dropped.push(source.to_string());
        }

        info!(
            "transformed {} source column(s), {} skipped, {} columns now",
            report.processed.len(),
            report.skipped.len(),
            df.width()
        );
        Ok(report)
    }
}

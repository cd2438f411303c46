//! Variant Scorer Rust Implementation
//!
//! Turns free-text variant annotator output (VEP-style TSV) into the fixed
//! numeric feature matrix a pre-trained pathogenicity classifier consumes,
//! scores each record and attaches a suggested class.
//!
//! Module layout follows the order a table flows through:
//! - `data/`: TSV loading with Polars
//! - `normalizer/`: annotator header → internal column names
//! - `transformers/`: one parser per annotated field
//! - `pipeline/`: applies the transformers, defers source drops
//! - `validators/`: schema gates between stages
//! - `categorical/`, `predictor/`, `suggestor/`: model-facing stages
//! - `scorer/`: coordinator tying the stages together

pub mod categorical;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod export;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod predictor;
pub mod schema;
pub mod scorer;
pub mod suggestor;
pub mod transformers;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use categorical::CategoricalEncoder;
pub use config::PipelineConfig;
pub use context::{init_logging, RunContext};
pub use data::{load_variant_table, VariantTable};
pub use error::{PipelineError, Result};
pub use export::{export_scores, select_output};
pub use model::{validate_versions_compatible, Classifier, ModelFeatureContract};
pub use normalizer::ColumnNormalizer;
pub use pipeline::{TransformReport, TransformerPipeline};
pub use predictor::Predictor;
pub use scorer::{transform_table, VariantScorer, FRAMEWORK_VERSION};
pub use suggestor::{ClassSuggestor, OutputClass, SuggestionPolicy, UncertainPolicy};
pub use transformers::{Transformer, TransformerKind};

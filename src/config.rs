//! Pipeline Configuration
//!
//! JSON run configuration. Every field has a default so an empty object
//! (or no file at all) gives the standard pipeline.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Per-transformer property overrides, keyed by transformer label
    /// ("SIFT", "Type", "CDSPosition", ...).
    /// Values are kept untyped here and checked when transformers are built.
    #[serde(default)]
    pub transformers: BTreeMap<String, Value>,

    /// Tokens read as null when loading annotator output
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,

    /// tracing filter directive, e.g. "info" or "variant_scorer_rust=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Label attached to the run span
    #[serde(default = "default_run_label")]
    pub run_label: String,
}

fn default_null_values() -> Vec<String> {
    vec![".".to_string()]
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_run_label() -> String {
    "variant-run".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            transformers: BTreeMap::new(),
            null_values: default_null_values(),
            log_filter: default_log_filter(),
            run_label: default_run_label(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override object for one transformer, if configured
    pub fn transformer_override(&self, name: &str) -> Option<&Value> {
        self.transformers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config.null_values, vec![".".to_string()]);
        assert_eq!(config.log_filter, "info");
        assert!(config.transformers.is_empty());
    }

    #[test]
    fn test_transformer_override_is_kept_untyped() {
        let json = r#"{
            "transformers": { "Seq": { "usable": true }, "SIFT": { "usable": "yes" } },
            "run_label": "batch-7"
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert_eq!(config.run_label, "batch-7");
        assert!(config.transformer_override("Seq").is_some());
        // Type checking happens at transformer construction, not here
        assert!(config.transformer_override("SIFT").unwrap()["usable"].is_string());
        assert!(config.transformer_override("PolyPhen").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load(Path::new("/nonexistent/pipeline.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}

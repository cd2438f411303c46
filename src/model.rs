//! Model Feature Contract
//!
//! The classifier itself is opaque: the pipeline only needs to know which
//! feature columns it expects and how to ask it for class probabilities.
//! The contract is read from JSON and never modified.

use crate::error::{PipelineError, Result};
use polars::prelude::DataFrame;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// `major.minor.patch` with an optional `a`, `b` or `rcN` prerelease tag
const VERSION_PATTERN: &str =
    r"^(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(-?(?P<prerelease>a|b|rc[0-9]+))?$";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelFeatureContract {
    pub model_version: String,

    /// Feature columns in the order the classifier consumes them
    pub feature_names: Vec<String>,

    /// Annotator source column → columns derived from it
    #[serde(default)]
    pub vep_features: BTreeMap<String, Vec<String>>,

    /// Categorical column → category values the model was trained on
    #[serde(default)]
    pub processable_features: BTreeMap<String, Vec<String>>,
}

impl ModelFeatureContract {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::Model(format!("failed to read model contract {:?}: {}", path, e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let contract: ModelFeatureContract = serde_json::from_str(json)?;
        if contract.feature_names.is_empty() {
            return Err(PipelineError::Model(
                "model contract declares no feature names".to_string(),
            ));
        }
        Ok(contract)
    }
}

/// A pre-trained binary classifier
pub trait Classifier {
    fn contract(&self) -> &ModelFeatureContract;

    /// Class probabilities per row, `[benign, pathogenic]`.
    /// `features` holds exactly `feature_names()`, in that order.
    fn predict_proba(&self, features: &DataFrame) -> Result<Vec<[f64; 2]>>;

    fn model_version(&self) -> &str {
        &self.contract().model_version
    }

    fn feature_names(&self) -> &[String] {
        &self.contract().feature_names
    }

    fn vep_features(&self) -> &BTreeMap<String, Vec<String>> {
        &self.contract().vep_features
    }

    fn processable_features(&self) -> &BTreeMap<String, Vec<String>> {
        &self.contract().processable_features
    }
}

struct Version<'a> {
    major: &'a str,
    minor: &'a str,
    patch: &'a str,
    prerelease: Option<&'a str>,
}

fn parse_version<'a>(regex: &Regex, label: &str, version: &'a str) -> Result<Version<'a>> {
    let caps = regex.captures(version).ok_or_else(|| {
        PipelineError::Model(format!("{} version does not adhere to correct format: {}", label, version))
    })?;
    let group = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or_default();
    Ok(Version {
        major: group("major"),
        minor: group("minor"),
        patch: group("patch"),
        prerelease: caps.name("prerelease").map(|m| m.as_str()),
    })
}

/// Check that a model can be used with this framework version.
///
/// Majors must agree. When either side is a prerelease, minor, patch and
/// the prerelease tag must agree too.
pub fn validate_versions_compatible(framework_version: &str, model_version: &str) -> Result<()> {
    let regex = Regex::new(VERSION_PATTERN)
        .map_err(|e| PipelineError::Model(format!("invalid version pattern: {}", e)))?;

    let framework = parse_version(&regex, "framework", framework_version)?;
    let model = parse_version(&regex, "model", model_version)?;

    if framework.major != model.major {
        return Err(PipelineError::Model(format!(
            "framework major version {} does not match the model {}",
            framework_version, model_version
        )));
    }

    if framework.prerelease.is_some() || model.prerelease.is_some() {
        let pairs = [
            ("minor", Some(framework.minor), Some(model.minor)),
            ("patch", Some(framework.patch), Some(model.patch)),
            ("prerelease", framework.prerelease, model.prerelease),
        ];
        for (part, ours, theirs) in pairs {
            if ours != theirs {
                return Err(PipelineError::Model(format!(
                    "framework {} version {} does not match the model {} version {} \
                     (must match for prereleases)",
                    part, framework_version, part, model_version
                )));
            }
        }
    }
    Ok(())
}

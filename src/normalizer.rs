//! Column Normalizer
//!
//! Renames annotator headers to the pipeline's internal names using the
//! canonical table in `schema`. Header artefacts (`#CHROM`, `%SYMBOL`) are
//! matched without their leading marker. Unknown columns pass through.

use crate::error::Result;
use crate::schema::internal_name;
use crate::validators::invalid_input;
use polars::prelude::*;
use rustc_hash::FxHashMap;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rename canonical columns in place.
    ///
    /// # Returns
    /// `(from, to)` pairs for every column actually renamed; a second call on
    /// the same table returns an empty list. Two columns landing on the same
    /// name are rejected before anything is renamed.
    pub fn normalize(&self, df: &mut DataFrame) -> Result<Vec<(String, String)>> {
        let mut renames = Vec::new();
        let mut names: Vec<String> = Vec::with_capacity(df.width());

        for name in df.get_column_names() {
            let raw = name.as_str();
            let bare = raw.trim_start_matches(['#', '%']);
            match internal_name(bare) {
                Some(internal) if internal != raw => {
                    renames.push((raw.to_string(), internal.to_string()));
                    names.push(internal.to_string());
                }
                _ => names.push(raw.to_string()),
            }
        }

        let mut owners: FxHashMap<&str, &str> = FxHashMap::default();
        for (target, raw) in names.iter().zip(df.get_column_names()) {
            if let Some(first) = owners.insert(target.as_str(), raw.as_str()) {
                return Err(invalid_input(format!(
                    "columns '{}' and '{}' both map to '{}'",
                    first,
                    raw.as_str(),
                    target
                )));
            }
        }

        for (from, to) in &renames {
            info!("renaming column '{}' to '{}'", from, to);
        }
        if !renames.is_empty() {
            df.set_column_names(names.iter().map(|s| s.as_str()))?;
        }
        Ok(renames)
    }
}

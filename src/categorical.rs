//! Categorical Encoding
//!
//! One-hot encodes the categorical columns a model was trained on. Values
//! outside the retained categories (and nulls) collapse into
//! `other_CAPICE_value` before encoding. A retained category that occurs in no
//! row becomes an all-null column, so the feature set always matches the model.
//! The encoded source column is dropped unless it belongs to the output layout.

use crate::error::{PipelineError, Result};
use crate::schema::{OTHER_CATEGORY, OUTPUT_COLUMNS};
use crate::utils::{missing_columns, null_series, string_values};
use polars::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

#[derive(Debug, Default, Clone, Copy)]
pub struct CategoricalEncoder;

impl CategoricalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Replace each categorical column `F` by `F_<value>` indicator columns.
    ///
    /// # Arguments
    /// * `processable` - categorical column → retained category values
    ///
    /// # Returns
    /// Names of the indicator columns added, in encoding order
    pub fn encode(
        &self,
        df: &mut DataFrame,
        processable: &BTreeMap<String, Vec<String>>,
    ) -> Result<Vec<String>> {
        let sources: Vec<&str> = processable.keys().map(|k| k.as_str()).collect();
        let missing = missing_columns(df, &sources);
        if !missing.is_empty() {
            error!("encode: missing required column(s): {}", missing.join(", "));
            return Err(PipelineError::Schema { stage: "encode", missing });
        }

        let mut added = Vec::new();
        for (feature, categories) in processable {
            debug!(
                "encoding {} with {} retained value(s): {}",
                feature,
                categories.len(),
                categories.join(", ")
            );
            let retained: FxHashSet<&str> = categories.iter().map(|c| c.as_str()).collect();
            let raw = string_values(df, feature)?;
            let collapsed: Vec<&str> = (&raw)
                .into_iter()
                .map(|v| match v {
                    Some(v) if retained.contains(v) => v,
                    _ => OTHER_CATEGORY,
                })
                .collect();

            let height = df.height();
            for category in categories {
                let category = category.as_str();
                let name = format!("{}_{}", feature, category);
                let present = collapsed.iter().any(|v| *v == category);
                let series = if present {
                    let flags: Vec<i64> = collapsed
                        .iter()
                        .map(|v| i64::from(*v == category))
                        .collect();
                    Series::new(name.as_str().into(), flags)
                } else {
                    debug!("category column {} absent in data, filling with null", name);
                    null_series(&name, height, &DataType::Int64)
                };
                df.with_column(series)?;
                added.push(name);
            }

            // exported identity columns (REF, ALT, ...) outlive encoding
            if !OUTPUT_COLUMNS.contains(&feature.as_str()) {
                df.drop_in_place(feature)?;
            }
        }

        info!(
            "encoded {} categorical column(s) into {} indicator column(s)",
            processable.len(),
            added.len()
        );
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processable() -> BTreeMap<String, Vec<String>> {
        let mut map = BTreeMap::new();
        map.insert(
            "Type".to_string(),
            vec![
                "SNV".to_string(),
                "DEL".to_string(),
                "INS".to_string(),
                OTHER_CATEGORY.to_string(),
            ],
        );
        map
    }

    #[test]
    fn test_one_hot_with_other() {
        let mut df = df!["Type" => &[Some("SNV"), Some("DELINS"), Some("DEL"), None]].unwrap();
        let added = CategoricalEncoder::new().encode(&mut df, &processable()).unwrap();

        assert_eq!(
            added,
            vec!["Type_SNV", "Type_DEL", "Type_INS", "Type_other_CAPICE_value"]
        );
        assert!(df.column("Type").is_err());

        let snv: Vec<Option<i64>> = df.column("Type_SNV").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(snv, vec![Some(1), Some(0), Some(0), Some(0)]);
        let other: Vec<Option<i64>> = df
            .column("Type_other_CAPICE_value")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(other, vec![Some(0), Some(1), Some(0), Some(1)]);
    }

    #[test]
    fn test_absent_category_is_null_column() {
        let mut df = df!["Type" => &["SNV", "DEL"]].unwrap();
        CategoricalEncoder::new().encode(&mut df, &processable()).unwrap();

        let ins = df.column("Type_INS").unwrap();
        assert_eq!(ins.null_count(), 2);
        assert_eq!(ins.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_output_column_kept_after_encoding() {
        let mut processable = BTreeMap::new();
        processable.insert("REF".to_string(), vec!["A".to_string(), "C".to_string()]);
        let mut df = df!["REF" => &["A", "G", "C"]].unwrap();
        let added = CategoricalEncoder::new().encode(&mut df, &processable).unwrap();

        assert_eq!(added, vec!["REF_A", "REF_C"]);
        let kept: Vec<Option<&str>> = df.column("REF").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(kept, vec![Some("A"), Some("G"), Some("C")]);
        let ref_c: Vec<Option<i64>> = df.column("REF_C").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ref_c, vec![Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn test_missing_source_is_schema_error() {
        let mut df = df!["Length" => &[1i64]].unwrap();
        let err = CategoricalEncoder::new().encode(&mut df, &processable()).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { stage: "encode", .. }));
        assert_eq!(err.missing_columns().unwrap(), &["Type".to_string()]);
    }
}

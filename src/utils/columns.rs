//! Column access helpers with explicit validation
//!
//! Safe, explicit patterns for reading typed columns out of a DataFrame and
//! for collecting the complete list of missing columns in one pass.

use crate::error::Result;
use polars::prelude::*;
use rustc_hash::FxHashSet;

/// Columns from `required` not present in `df`
///
/// Order follows `required`, duplicates are reported once.
///
/// # Example
/// ```rust,ignore
/// let missing = missing_columns(&df, &["chr", "pos", "REF", "ALT"]);
/// if !missing.is_empty() { /* fail with the full list */ }
/// ```
pub fn missing_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Vec<String> {
    let actual: FxHashSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.as_str())
        .collect();

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut missing = Vec::new();
    for name in required {
        let name = name.as_ref();
        if !actual.contains(name) && seen.insert(name) {
            missing.push(name.to_string());
        }
    }
    missing
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// True when every row of the column is null (also true for zero rows)
pub fn is_all_null(df: &DataFrame, name: &str) -> Result<bool> {
    let column = df.column(name)?;
    Ok(column.null_count() == column.len())
}

pub fn is_textual(df: &DataFrame, name: &str) -> Result<bool> {
    Ok(matches!(df.column(name)?.dtype(), DataType::String))
}

/// Column contents as strings, casting non-string storage
pub fn string_values(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.clone())
}

/// Column contents as f64, casting integer/string storage
pub fn float_values(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.clone())
}

/// Uniform null column of the given dtype
pub fn null_series(name: &str, height: usize, dtype: &DataType) -> Series {
    Series::full_null(name.into(), height, dtype)
}

//! Variant type and length from the REF/ALT allele pair
//!
//! Both read `REF` as their source and `ALT` as a secondary input, and both
//! keep `REF` in the table since it is part of the exported record.

use crate::error::Result;
use crate::schema::column;
use crate::utils::string_values;
use polars::prelude::*;

/// Classify an allele pair.
///
/// Rules are checked in order; the first match wins:
/// - SNV: both alleles are a single base
/// - DEL: ALT is a single base equal to the first base of REF
/// - INS: REF is a single base equal to the first base of ALT
/// - DELINS: anything else
pub fn variant_type(reference: &str, alternate: &str) -> &'static str {
    let ref_len = reference.chars().count();
    let alt_len = alternate.chars().count();

    if ref_len == 1 && alt_len == 1 {
        "SNV"
    } else if alt_len == 1 && reference.chars().next() == alternate.chars().next() {
        "DEL"
    } else if ref_len == 1 && alternate.chars().next() == reference.chars().next() {
        "INS"
    } else {
        "DELINS"
    }
}

pub fn variant_length(reference: &str, alternate: &str) -> i64 {
    let ref_len = reference.chars().count() as i64;
    let alt_len = alternate.chars().count() as i64;
    (ref_len - alt_len).abs()
}

pub fn process_type(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let types: Vec<Option<&'static str>> = map_alleles(df, source, variant_type)?;
    df.with_column(Series::new(columns[0].as_str().into(), types))?;
    Ok(())
}

pub fn process_length(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let lengths: Vec<Option<i64>> = map_alleles(df, source, variant_length)?;
    df.with_column(Series::new(columns[0].as_str().into(), lengths))?;
    Ok(())
}

/// Apply `f` to every row with both alleles present; rows missing either are null
fn map_alleles<T>(df: &DataFrame, source: &str, f: fn(&str, &str) -> T) -> Result<Vec<Option<T>>> {
    let references = string_values(df, source)?;
    let alternates = string_values(df, column::ALT)?;

    Ok(references
        .into_iter()
        .zip(&alternates)
        .map(|pair| match pair {
            (Some(r), Some(a)) => Some(f(r, a)),
            _ => None,
        })
        .collect())
}

//! Sequence composition around the variant (GC and CpG content)
//!
//! Disabled by default; current models do not use these features.

use crate::error::Result;
use crate::utils::string_values;
use polars::prelude::*;

/// Ambiguous bases contribute their expected GC share
const N_GC_WEIGHT: f64 = 0.41;
const N_CPG_WEIGHT: f64 = 0.01;

pub fn gc_content(sequence: &str) -> Option<f64> {
    let len = sequence.len();
    if len == 0 {
        return None;
    }
    let upper = sequence.to_ascii_uppercase();
    let gc = upper.bytes().filter(|b| matches!(b, b'G' | b'C')).count() as f64;
    let n = upper.bytes().filter(|b| *b == b'N').count() as f64;
    Some((gc + N_GC_WEIGHT * n) / len as f64)
}

pub fn cpg_content(sequence: &str) -> Option<f64> {
    let len = sequence.len();
    if len < 2 {
        return None;
    }
    let upper = sequence.to_ascii_uppercase();
    let cpg = upper.matches("CG").count() as f64;
    let n = upper.bytes().filter(|b| *b == b'N').count() as f64;
    Some((cpg + N_CPG_WEIGHT * n) / (len - 1) as f64 * 2.0)
}

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = string_values(df, source)?;

    let gc: Vec<Option<f64>> = (&values).into_iter().map(|v| v.and_then(gc_content)).collect();
    let cpg: Vec<Option<f64>> = (&values).into_iter().map(|v| v.and_then(cpg_content)).collect();

    df.with_column(Series::new(columns[0].as_str().into(), gc))?;
    df.with_column(Series::new(columns[1].as_str().into(), cpg))?;
    Ok(())
}

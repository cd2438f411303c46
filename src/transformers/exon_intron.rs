//! Exon and intron numbering, `number/total` with optional `first-last` ranges

use super::parse_number;
use crate::error::Result;
use crate::utils::string_values;
use polars::prelude::*;

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = string_values(df, source)?;

    let mut numbers: Vec<Option<i64>> = Vec::with_capacity(values.len());
    let mut totals: Vec<Option<i64>> = Vec::with_capacity(values.len());
    for value in &values {
        let (number, total) = match value {
            Some(v) => match v.split_once('/') {
                Some((n, t)) => (Some(n), Some(t)),
                None => (Some(v), None),
            },
            None => (None, None),
        };
        // a variant spanning several exons reports the first one
        let number = number.map(|n| n.split('-').next().unwrap_or(n));
        numbers.push(parse_number(source, number)?);
        totals.push(parse_number(source, total)?);
    }

    df.with_column(Series::new(columns[0].as_str().into(), numbers))?;
    df.with_column(Series::new(columns[1].as_str().into(), totals))?;
    Ok(())
}

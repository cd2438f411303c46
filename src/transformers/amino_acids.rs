//! Amino acid change: "A/G" becomes original `A`, new `G`.

use crate::error::Result;
use crate::utils::string_values;
use polars::prelude::*;

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = string_values(df, source)?;

    let mut original: Vec<Option<&str>> = Vec::with_capacity(values.len());
    let mut new: Vec<Option<&str>> = Vec::with_capacity(values.len());
    for value in &values {
        let (o, n) = match value {
            Some(v) => match v.split_once('/') {
                Some((o, n)) => (Some(o), Some(n)),
                // synonymous: same residue on both sides
                None => (Some(v), Some(v)),
            },
            None => (None, None),
        };
        original.push(o);
        new.push(n);
    }

    df.with_column(Series::new(columns[0].as_str().into(), original))?;
    df.with_column(Series::new(columns[1].as_str().into(), new))?;
    Ok(())
}

//! Whether the SpliceAI prediction was made for the record's own gene

use crate::error::Result;
use crate::schema::column;
use crate::utils::string_values;
use polars::prelude::*;

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let symbols = string_values(df, source)?;
    let genes = string_values(df, column::GENE_NAME)?;

    let matches: Vec<i64> = symbols
        .into_iter()
        .zip(&genes)
        .map(|pair| match pair {
            (Some(symbol), Some(gene)) if symbol == gene => 1,
            _ => 0,
        })
        .collect();

    df.with_column(Series::new(columns[0].as_str().into(), matches))?;
    Ok(())
}

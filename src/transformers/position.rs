//! cDNA / CDS / protein position parsing
//!
//! Annotators write positions as `pos/total`, with open-ended ranges such as
//! `?-45/300` or `12-?/300` and closed ranges `12-14/300`. The range start is
//! kept. A column the loader already typed as numeric (no totals present in
//! the file) is assigned directly.

use super::parse_number;
use crate::error::Result;
use crate::utils::{float_values, has_column, is_textual, null_series, string_values};
use polars::prelude::*;

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    if is_textual(df, source)? {
        process_textual(df, source, columns)
    } else {
        process_numeric(df, source, columns)
    }
}

fn process_textual(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = string_values(df, source)?;

    let mut positions: Vec<Option<f64>> = Vec::with_capacity(values.len());
    let mut totals: Vec<Option<f64>> = Vec::with_capacity(values.len());
    for value in &values {
        let (position, total) = match value {
            Some(v) => match v.split_once('/') {
                Some((p, t)) => (Some(p), Some(t)),
                None => (Some(v), None),
            },
            None => (None, None),
        };
        let position = position.map(range_start);
        positions.push(parse_number(source, position)?);
        totals.push(parse_number(source, total)?);
    }

    df.with_column(Series::new(columns[0].as_str().into(), positions))?;
    df.with_column(Series::new(columns[1].as_str().into(), totals))?;
    Ok(())
}

fn process_numeric(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = float_values(df, source)?;
    df.with_column(values.with_name(columns[0].as_str().into()).into_series())?;

    let height = df.height();
    for companion in &columns[1..] {
        if !has_column(df, companion) {
            df.with_column(null_series(companion, height, &DataType::Float64))?;
        }
    }
    Ok(())
}

/// Strip open-range markers and keep the first coordinate
fn range_start(raw: &str) -> &str {
    let stripped = raw.strip_prefix("?-").unwrap_or(raw);
    let stripped = stripped.strip_suffix("-?").unwrap_or(stripped);
    match stripped.split_once('-') {
        Some((start, _)) => start,
        None => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn outputs() -> Vec<String> {
        vec!["CDSpos".to_string(), "relCDSpos".to_string()]
    }

    #[test]
    fn test_range_start() {
        assert_eq!(range_start("?-45"), "45");
        assert_eq!(range_start("12-?"), "12");
        assert_eq!(range_start("12-14"), "12");
        assert_eq!(range_start("7"), "7");
    }

    #[test]
    fn test_textual_positions() {
        let mut df = df![
            "CDS_position" => &[Some("12/300"), Some("?-45/300"), Some("12-14/300"), Some("8"), None]
        ]
        .unwrap();
        process(&mut df, "CDS_position", &outputs()).unwrap();

        let pos = df.column("CDSpos").unwrap().f64().unwrap().clone();
        let total = df.column("relCDSpos").unwrap().f64().unwrap().clone();
        assert_relative_eq!(pos.get(0).unwrap(), 12.0);
        assert_relative_eq!(total.get(0).unwrap(), 300.0);
        assert_relative_eq!(pos.get(1).unwrap(), 45.0);
        assert_relative_eq!(pos.get(2).unwrap(), 12.0);
        assert_relative_eq!(pos.get(3).unwrap(), 8.0);
        assert_eq!(total.get(3), None);
        assert_eq!(pos.get(4), None);
        assert_eq!(total.get(4), None);
    }

    #[test]
    fn test_unparseable_position_is_error() {
        let mut df = df!["CDS_position" => &["abc/300"]].unwrap();
        assert!(process(&mut df, "CDS_position", &outputs()).is_err());
    }

    #[test]
    fn test_numeric_storage_assigned_directly() {
        let mut df = df!["CDS_position" => &[Some(10i64), None, Some(42)]].unwrap();
        process(&mut df, "CDS_position", &outputs()).unwrap();

        let pos = df.column("CDSpos").unwrap();
        assert_eq!(pos.dtype(), &DataType::Float64);
        assert_relative_eq!(pos.f64().unwrap().get(2).unwrap(), 42.0);
        let total = df.column("relCDSpos").unwrap();
        assert_eq!(total.null_count(), 3);
        assert_eq!(total.dtype(), &DataType::Float64);
    }
}

//! SIFT and PolyPhen prediction scores with their categorical bins

use super::parse_number;
use crate::error::Result;
use crate::utils::{float_values, is_textual, string_values};
use polars::prelude::*;

const SIFT_DELETERIOUS_MAX: f64 = 0.05;
const POLYPHEN_POSSIBLY_DAMAGING: f64 = 0.445;
const POLYPHEN_PROBABLY_DAMAGING: f64 = 0.908;

pub fn sift_category(score: f64) -> &'static str {
    if score <= SIFT_DELETERIOUS_MAX {
        "deleterious"
    } else {
        "tolerated"
    }
}

pub fn polyphen_category(score: f64) -> &'static str {
    if score > POLYPHEN_PROBABLY_DAMAGING {
        "probably_damaging"
    } else if score > POLYPHEN_POSSIBLY_DAMAGING {
        "possibly_damaging"
    } else {
        "benign"
    }
}

pub fn process_sift(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    process_scored(df, source, columns, sift_category)
}

pub fn process_polyphen(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    process_scored(df, source, columns, polyphen_category)
}

/// Writes `columns[0]` (category) and `columns[1]` (score). NaN counts as null.
fn process_scored(
    df: &mut DataFrame,
    source: &str,
    columns: &[String],
    categorize: fn(f64) -> &'static str,
) -> Result<()> {
    // textual scores are parsed strictly, never cast
    let values: Vec<Option<f64>> = if is_textual(df, source)? {
        let raw = string_values(df, source)?;
        (&raw)
            .into_iter()
            .map(|v| parse_number::<f64>(source, v))
            .collect::<Result<_>>()?
    } else {
        let raw = float_values(df, source)?;
        (&raw).into_iter().collect()
    };

    let scores: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    let categories: Vec<Option<&str>> = scores.iter().map(|v| v.map(categorize)).collect();

    df.with_column(Series::new(columns[0].as_str().into(), categories))?;
    df.with_column(Series::new(columns[1].as_str().into(), scores))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use approx::assert_relative_eq;

    #[test]
    fn test_sift_bins() {
        let mut df = df!["SIFT" => &[Some(0.002), Some(0.05), Some(0.9), None]].unwrap();
        let outputs = vec!["SIFTcat".to_string(), "SIFTval".to_string()];
        process_sift(&mut df, "SIFT", &outputs).unwrap();

        let cat = df.column("SIFTcat").unwrap().str().unwrap().clone();
        assert_eq!(cat.get(0), Some("deleterious"));
        assert_eq!(cat.get(1), Some("deleterious"));
        assert_eq!(cat.get(2), Some("tolerated"));
        assert_eq!(cat.get(3), None);

        let val = df.column("SIFTval").unwrap().f64().unwrap().clone();
        assert_relative_eq!(val.get(0).unwrap(), 0.002);
        assert_eq!(val.get(3), None);
    }

    #[test]
    fn test_polyphen_bins() {
        let mut df = df!["PolyPhen" => &[Some(0.445), Some(0.908), Some(0.999), Some(0.1), None]].unwrap();
        let outputs = vec!["PolyPhenCat".to_string(), "PolyPhenVal".to_string()];
        process_polyphen(&mut df, "PolyPhen", &outputs).unwrap();

        let cat = df.column("PolyPhenCat").unwrap().str().unwrap().clone();
        assert_eq!(cat.get(0), Some("benign"));
        assert_eq!(cat.get(1), Some("possibly_damaging"));
        assert_eq!(cat.get(2), Some("probably_damaging"));
        assert_eq!(cat.get(3), Some("benign"));
        assert_eq!(cat.get(4), None);
    }

    #[test]
    fn test_textual_scores_are_cast() {
        let mut df = df!["SIFT" => &["0.01", "0.5"]].unwrap();
        let outputs = vec!["SIFTcat".to_string(), "SIFTval".to_string()];
        process_sift(&mut df, "SIFT", &outputs).unwrap();
        let cat = df.column("SIFTcat").unwrap().str().unwrap().clone();
        assert_eq!(cat.get(0), Some("deleterious"));
        assert_eq!(cat.get(1), Some("tolerated"));
    }

    #[test]
    fn test_annotated_text_score_is_parse_error() {
        let mut df = df!["SIFT" => &[Some("0.2"), Some("deleterious(0.01)"), None]].unwrap();
        let outputs = vec!["SIFTcat".to_string(), "SIFTval".to_string()];
        let err = process_sift(&mut df, "SIFT", &outputs).unwrap_err();

        match err {
            PipelineError::Parse { column, value } => {
                assert_eq!(column, "SIFT");
                assert_eq!(value, "deleterious(0.01)");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(df.column("SIFTval").is_err());
    }
}

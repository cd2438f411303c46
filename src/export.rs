//! Result export in the fixed output layout

use crate::error::{PipelineError, Result};
use crate::schema::OUTPUT_COLUMNS;
use crate::utils::missing_columns;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{error, info};

/// Project a scored table onto the output columns, in output order
pub fn select_output(df: &DataFrame) -> Result<DataFrame> {
    let missing = missing_columns(df, &OUTPUT_COLUMNS);
    if !missing.is_empty() {
        error!("export: missing required column(s): {}", missing.join(", "));
        return Err(PipelineError::Schema { stage: "export", missing });
    }
    Ok(df.select(OUTPUT_COLUMNS)?)
}

/// Write the output columns as a tab-separated file with a header row
pub fn export_scores(df: &DataFrame, path: &Path) -> Result<()> {
    let mut output = select_output(df)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b'\t')
        .finish(&mut output)?;
    info!("wrote {} scored variant(s) to {:?}", output.height(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scored() -> DataFrame {
        df![
            "Length" => &[0i64],
            "chr" => &["1"],
            "pos" => &[100i64],
            "REF" => &["A"],
            "ALT" => &["G"],
            "gene_name" => &["BRCA1"],
            "gene_id" => &["672"],
            "id_source" => &["EntrezGene"],
            "feature" => &["NM_007294.4"],
            "feature_type" => &["Transcript"],
            "score" => &[0.42],
            "suggested_class" => &["VUS"],
        ]
        .unwrap()
    }

    #[test]
    fn test_select_output_order() {
        let out = select_output(&scored()).unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, OUTPUT_COLUMNS.to_vec());
    }

    #[test]
    fn test_select_output_missing() {
        let df = scored().drop("score").unwrap().drop("feature_type").unwrap();
        let err = select_output(&df).unwrap_err();
        assert_eq!(
            err.missing_columns().unwrap(),
            &["feature_type".to_string(), "score".to_string()]
        );
    }

    #[test]
    fn test_export_writes_tsv() {
        let path = std::env::temp_dir().join(format!("variant_scores_{}.tsv", std::process::id()));
        export_scores(&scored(), &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "chr\tpos\tREF\tALT\tgene_name\tgene_id\tid_source\tfeature\tfeature_type\tscore\tsuggested_class"
        );
        assert!(lines.next().unwrap().starts_with("1\t100\tA\tG\tBRCA1"));
    }
}

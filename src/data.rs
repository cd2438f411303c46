//! Data Loading
//!
//! Reads tab-separated annotator output into a `VariantTable` using Polars.
//! Header comments such as `#CHROM` are left for the normalizer to resolve.

use crate::config::PipelineConfig;
use crate::error::Result;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// One row per annotated variant/transcript record.
/// Owned by whichever stage is currently working on it.
pub type VariantTable = DataFrame;

/// Load annotator output (TSV with a header row)
///
/// Tokens in `config.null_values` and empty fields are read as null. The
/// schema is inferred over the whole file, so a column that is numeric in
/// every row (e.g. `CDS_position` without totals) arrives as a number.
pub fn load_variant_table(path: &Path, config: &PipelineConfig) -> Result<VariantTable> {
    let null_values: Vec<PlSmallStr> = config
        .null_values
        .iter()
        .map(|token| PlSmallStr::from(token.as_str()))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| {
            opts.with_separator(b'\t')
                .with_null_values(Some(NullValues::AllColumns(null_values.clone())))
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(
        "loaded {} variant record(s) with {} column(s) from {:?}",
        df.height(),
        df.width(),
        path
    );
    Ok(df)
}

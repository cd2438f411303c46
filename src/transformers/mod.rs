//! Annotation field transformers
//!
//! Each transformer consumes one raw annotator column (its `name`) and writes
//! one or more typed feature columns. The set of transformers is closed: one
//! `TransformerKind` variant per annotated field, built into a registry when
//! the pipeline is constructed.
//!
//! Shared contract for every kind:
//! - a source column that is null in every row never reaches the parser; all
//!   declared outputs are filled with a uniform null of their dtype instead
//! - a usable transformer populates every declared column for every row
//! - the source column is dropped afterwards unless `drop()` says otherwise

pub mod allele;
pub mod amino_acids;
pub mod consequence;
pub mod exon_intron;
pub mod position;
pub mod seq;
pub mod sift_polyphen;
pub mod splice_ai;

use crate::error::{PipelineError, Result};
use crate::schema::{column, CONSEQUENCE_TERMS};
use crate::utils::{has_column, is_all_null, null_series};
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Which positional annotation a position transformer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    Cdna,
    Cds,
    Protein,
}

/// Exon or intron numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Exon,
    Intron,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformerKind {
    AminoAcids,
    Position(PositionKind),
    ExonIntron(Segment),
    Consequence,
    Sift,
    PolyPhen,
    SpliceAi,
    VariantType,
    Length,
    Seq,
}

impl TransformerKind {
    /// Every known transformer, in application order
    pub const ALL: [TransformerKind; 13] = [
        TransformerKind::AminoAcids,
        TransformerKind::Position(PositionKind::Cdna),
        TransformerKind::Position(PositionKind::Cds),
        TransformerKind::Position(PositionKind::Protein),
        TransformerKind::ExonIntron(Segment::Exon),
        TransformerKind::ExonIntron(Segment::Intron),
        TransformerKind::Consequence,
        TransformerKind::Sift,
        TransformerKind::PolyPhen,
        TransformerKind::SpliceAi,
        TransformerKind::VariantType,
        TransformerKind::Length,
        TransformerKind::Seq,
    ];

    /// Stable label, also the key for config overrides
    pub fn label(&self) -> &'static str {
        match self {
            TransformerKind::AminoAcids => "AminoAcids",
            TransformerKind::Position(PositionKind::Cdna) => "CDNAPosition",
            TransformerKind::Position(PositionKind::Cds) => "CDSPosition",
            TransformerKind::Position(PositionKind::Protein) => "ProteinPosition",
            TransformerKind::ExonIntron(Segment::Exon) => "Exon",
            TransformerKind::ExonIntron(Segment::Intron) => "Intron",
            TransformerKind::Consequence => "Consequence",
            TransformerKind::Sift => "SIFT",
            TransformerKind::PolyPhen => "PolyPhen",
            TransformerKind::SpliceAi => "SpliceAI",
            TransformerKind::VariantType => "Type",
            TransformerKind::Length => "Length",
            TransformerKind::Seq => "Seq",
        }
    }

    pub fn default_source(&self) -> &'static str {
        match self {
            TransformerKind::AminoAcids => "Amino_acids",
            TransformerKind::Position(PositionKind::Cdna) => "cDNA_position",
            TransformerKind::Position(PositionKind::Cds) => "CDS_position",
            TransformerKind::Position(PositionKind::Protein) => "Protein_position",
            TransformerKind::ExonIntron(Segment::Exon) => column::EXON,
            TransformerKind::ExonIntron(Segment::Intron) => column::INTRON,
            TransformerKind::Consequence => "Consequence",
            TransformerKind::Sift => "SIFT",
            TransformerKind::PolyPhen => "PolyPhen",
            TransformerKind::SpliceAi => "SpliceAI_pred_SYMBOL",
            TransformerKind::VariantType | TransformerKind::Length => column::REF,
            TransformerKind::Seq => "Seq",
        }
    }

    /// Sequence context is not a feature of current models
    pub fn default_usable(&self) -> bool {
        !matches!(self, TransformerKind::Seq)
    }

    /// REF is both a derivation source and an exported column
    pub fn drop(&self) -> bool {
        !matches!(self, TransformerKind::VariantType | TransformerKind::Length)
    }

    /// Columns read in addition to the source column
    pub fn secondary_inputs(&self) -> &'static [&'static str] {
        match self {
            TransformerKind::VariantType | TransformerKind::Length => &[column::ALT],
            TransformerKind::SpliceAi => &[column::GENE_NAME],
            _ => &[],
        }
    }

    /// Output columns with their dtypes, in declaration order
    fn outputs(&self) -> Vec<(String, DataType)> {
        let pair = |a: &str, b: &str, dtype: DataType| {
            vec![(a.to_string(), dtype.clone()), (b.to_string(), dtype)]
        };
        match self {
            TransformerKind::AminoAcids => pair("oAA", "nAA", DataType::String),
            TransformerKind::Position(PositionKind::Cdna) => {
                pair("cDNApos", "relcDNApos", DataType::Float64)
            }
            TransformerKind::Position(PositionKind::Cds) => {
                pair("CDSpos", "relCDSpos", DataType::Float64)
            }
            TransformerKind::Position(PositionKind::Protein) => {
                pair("protPos", "relProtPos", DataType::Float64)
            }
            TransformerKind::ExonIntron(Segment::Exon) => {
                pair("Exon_number", "Exon_total", DataType::Int64)
            }
            TransformerKind::ExonIntron(Segment::Intron) => {
                pair("Intron_number", "Intron_total", DataType::Int64)
            }
            TransformerKind::Consequence => CONSEQUENCE_TERMS
                .iter()
                .map(|term| (format!("is_{}", term), DataType::Int64))
                .collect(),
            TransformerKind::Sift => vec![
                ("SIFTcat".to_string(), DataType::String),
                ("SIFTval".to_string(), DataType::Float64),
            ],
            TransformerKind::PolyPhen => vec![
                ("PolyPhenCat".to_string(), DataType::String),
                ("PolyPhenVal".to_string(), DataType::Float64),
            ],
            TransformerKind::SpliceAi => {
                vec![("SpliceAI_pred_SYMBOL_match".to_string(), DataType::Int64)]
            }
            TransformerKind::VariantType => vec![("Type".to_string(), DataType::String)],
            TransformerKind::Length => vec![("Length".to_string(), DataType::Int64)],
            TransformerKind::Seq => pair("GC", "CpG", DataType::Float64),
        }
    }
}

/// A configured transformer instance
#[derive(Debug, Clone)]
pub struct Transformer {
    kind: TransformerKind,
    name: String,
    usable: bool,
    columns: Vec<String>,
    dtypes: Vec<DataType>,
}

impl Transformer {
    /// Transformer with its default source column and usability
    pub fn new(kind: TransformerKind) -> Result<Self> {
        Self::build(kind, kind.default_source().to_string(), kind.default_usable())
    }

    /// Transformer reading a custom source column
    pub fn with_source(kind: TransformerKind, name: &str, usable: bool) -> Result<Self> {
        Self::build(kind, name.to_string(), usable)
    }

    /// Apply a JSON override object (`{"usable": bool, "name": string}`).
    ///
    /// A property holding the wrong JSON type is a `TypeViolation`; the
    /// transformer is never built half-configured.
    pub fn with_overrides(kind: TransformerKind, overrides: Option<&Value>) -> Result<Self> {
        let mut name = kind.default_source().to_string();
        let mut usable = kind.default_usable();

        if let Some(overrides) = overrides {
            let object = overrides
                .as_object()
                .ok_or_else(|| type_violation(kind.label(), "overrides", "object", overrides))?;

            for (property, value) in object {
                match property.as_str() {
                    "usable" => {
                        usable = value
                            .as_bool()
                            .ok_or_else(|| type_violation(kind.label(), "usable", "bool", value))?;
                    }
                    "name" => {
                        name = value
                            .as_str()
                            .ok_or_else(|| type_violation(kind.label(), "name", "string", value))?
                            .to_string();
                    }
                    other => {
                        return Err(PipelineError::Config(format!(
                            "transformer '{}': unknown property '{}'",
                            kind.label(),
                            other
                        )))
                    }
                }
            }
        }

        Self::build(kind, name, usable)
    }

    fn build(kind: TransformerKind, name: String, usable: bool) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(PipelineError::TypeViolation {
                transformer: kind.label().to_string(),
                property: "name".to_string(),
                expected: "non-empty string",
                found: "empty string".to_string(),
            });
        }

        let (columns, dtypes) = kind.outputs().into_iter().unzip();
        Ok(Self { kind, name, usable, columns, dtypes })
    }

    pub fn kind(&self) -> TransformerKind {
        self.kind
    }

    /// Source column consumed by this transformer
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usable(&self) -> bool {
        self.usable
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn dtypes(&self) -> &[DataType] {
        &self.dtypes
    }

    pub fn drop(&self) -> bool {
        self.kind.drop()
    }

    /// Derive the declared columns from the source column, in place
    pub fn process(&self, df: &mut DataFrame) -> Result<()> {
        if is_all_null(df, &self.name)? {
            debug!(
                transformer = self.kind.label(),
                "source '{}' is entirely null, filling {} column(s) with null",
                self.name,
                self.columns.len()
            );
            let height = df.height();
            for (name, dtype) in self.columns.iter().zip(&self.dtypes) {
                df.with_column(null_series(name, height, dtype))?;
            }
            return Ok(());
        }

        let missing: Vec<String> = self
            .kind
            .secondary_inputs()
            .iter()
            .filter(|c| !has_column(df, c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::Schema { stage: "transform", missing });
        }

        match self.kind {
            TransformerKind::AminoAcids => amino_acids::process(df, &self.name, &self.columns),
            TransformerKind::Position(_) => position::process(df, &self.name, &self.columns),
            TransformerKind::ExonIntron(_) => exon_intron::process(df, &self.name, &self.columns),
            TransformerKind::Consequence => consequence::process(df, &self.name, &self.columns),
            TransformerKind::Sift => sift_polyphen::process_sift(df, &self.name, &self.columns),
            TransformerKind::PolyPhen => {
                sift_polyphen::process_polyphen(df, &self.name, &self.columns)
            }
            TransformerKind::SpliceAi => splice_ai::process(df, &self.name, &self.columns),
            TransformerKind::VariantType => allele::process_type(df, &self.name, &self.columns),
            TransformerKind::Length => allele::process_length(df, &self.name, &self.columns),
            TransformerKind::Seq => seq::process(df, &self.name, &self.columns),
        }
    }
}

fn type_violation(transformer: &str, property: &str, expected: &'static str, found: &Value) -> PipelineError {
    PipelineError::TypeViolation {
        transformer: transformer.to_string(),
        property: property.to_string(),
        expected,
        found: json_type_name(found).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse an optional numeric token; blank becomes null, garbage is an error
pub(crate) fn parse_number<T: std::str::FromStr>(column: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(token) => token.parse::<T>().map(Some).map_err(|_| PipelineError::Parse {
            column: column.to_string(),
            value: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_declares_matching_dtypes() {
        for kind in TransformerKind::ALL {
            let t = Transformer::new(kind).unwrap();
            assert!(!t.columns().is_empty(), "{}", kind.label());
            assert_eq!(t.columns().len(), t.dtypes().len(), "{}", kind.label());
        }
    }

    #[test]
    fn test_consequence_declares_36_columns() {
        let t = Transformer::new(TransformerKind::Consequence).unwrap();
        assert_eq!(t.columns().len(), 36);
        assert_eq!(t.columns()[3], "is_missense_variant");
    }

    #[test]
    fn test_defaults() {
        let seq = Transformer::new(TransformerKind::Seq).unwrap();
        assert!(!seq.usable());
        let length = Transformer::new(TransformerKind::Length).unwrap();
        assert!(length.usable());
        assert!(!length.drop());
        assert_eq!(length.name(), "REF");
        assert!(Transformer::new(TransformerKind::Sift).unwrap().drop());
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = json!({ "usable": true, "name": "Sequence" });
        let t = Transformer::with_overrides(TransformerKind::Seq, Some(&overrides)).unwrap();
        assert!(t.usable());
        assert_eq!(t.name(), "Sequence");
    }

    #[test]
    fn test_wrong_usable_type_is_type_violation() {
        let overrides = json!({ "usable": "yes" });
        let err = Transformer::with_overrides(TransformerKind::Sift, Some(&overrides)).unwrap_err();
        match err {
            PipelineError::TypeViolation { transformer, property, expected, found } => {
                assert_eq!(transformer, "SIFT");
                assert_eq!(property, "usable");
                assert_eq!(expected, "bool");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_name_type_is_type_violation() {
        let overrides = json!({ "name": 12 });
        let err = Transformer::with_overrides(
            TransformerKind::ExonIntron(Segment::Exon),
            Some(&overrides),
        );
        assert!(matches!(err, Err(PipelineError::TypeViolation { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Transformer::with_source(TransformerKind::AminoAcids, "  ", true);
        assert!(matches!(err, Err(PipelineError::TypeViolation { .. })));
    }

    #[test]
    fn test_unknown_property_rejected() {
        let overrides = json!({ "drop": false });
        let err = Transformer::with_overrides(TransformerKind::Sift, Some(&overrides));
        assert!(matches!(err, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_all_null_source_fills_every_output() {
        for kind in TransformerKind::ALL {
            let t = Transformer::new(kind).unwrap();
            let mut df = DataFrame::new(vec![
                Column::new(t.name().into(), &[None::<&str>, None, None]),
            ])
            .unwrap();

            // no secondary inputs present: the parser must never run
            t.process(&mut df).unwrap();

            assert_eq!(df.height(), 3);
            for (name, dtype) in t.columns().iter().zip(t.dtypes()) {
                let column = df.column(name).unwrap();
                assert_eq!(column.null_count(), 3, "{} / {}", kind.label(), name);
                assert_eq!(column.dtype(), dtype);
            }
        }
    }

    #[test]
    fn test_missing_secondary_input_is_schema_error() {
        let t = Transformer::new(TransformerKind::SpliceAi).unwrap();
        let mut df = df!["SpliceAI_pred_SYMBOL" => &["BRCA1"]].unwrap();
        let err = t.process(&mut df).unwrap_err();
        assert_eq!(err.missing_columns().unwrap(), &["gene_name".to_string()]);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<i64>("Exon", Some("12")).unwrap(), Some(12));
        assert_eq!(parse_number::<f64>("CDS", Some("")).unwrap(), None);
        assert_eq!(parse_number::<f64>("CDS", None).unwrap(), None);
        assert!(parse_number::<f64>("CDS", Some("?")).is_err());
    }
}

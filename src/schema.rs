//! Canonical Column Schema
//!
//! Fixed names shared by every stage: the annotator → internal rename table,
//! the consequence one-hot vocabulary, and the exported output layout.
//! These must match the names the trained classifier was built against.

/// Internal column names used after normalization
pub mod column {
    pub const CHR: &str = "chr";
    pub const POS: &str = "pos";
    pub const REF: &str = "REF";
    pub const ALT: &str = "ALT";
    pub const GENE_NAME: &str = "gene_name";
    pub const GENE_ID: &str = "gene_id";
    pub const ID_SOURCE: &str = "id_source";
    pub const FEATURE: &str = "feature";
    pub const FEATURE_TYPE: &str = "feature_type";
    pub const INTRON: &str = "Intron";
    pub const EXON: &str = "Exon";
    pub const MAX_AF: &str = "max_AF";
    pub const SCORE: &str = "score";
    pub const SUGGESTED_CLASS: &str = "suggested_class";
}

/// One entry of the rename table: annotator header → pipeline name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalColumn {
    pub external: &'static str,
    pub internal: &'static str,
    /// Must be present before transformation starts
    pub required: bool,
}

const fn canonical(external: &'static str, internal: &'static str, required: bool) -> CanonicalColumn {
    CanonicalColumn { external, internal, required }
}

pub const CANONICAL_COLUMNS: &[CanonicalColumn] = &[
    canonical("CHROM", column::CHR, true),
    canonical("POS", column::POS, true),
    canonical("REF", column::REF, true),
    canonical("ALT", column::ALT, true),
    canonical("SYMBOL", column::GENE_NAME, true),
    canonical("Gene", column::GENE_ID, true),
    canonical("SYMBOL_SOURCE", column::ID_SOURCE, true),
    canonical("Feature", column::FEATURE, true),
    canonical("Feature_type", column::FEATURE_TYPE, false),
    canonical("INTRON", column::INTRON, false),
    canonical("EXON", column::EXON, false),
    canonical("MAX_AF", column::MAX_AF, false),
];

/// Look up the internal name for an annotator header
pub fn internal_name(external: &str) -> Option<&'static str> {
    CANONICAL_COLUMNS
        .iter()
        .find(|c| c.external == external)
        .map(|c| c.internal)
}

/// Raw columns that must exist after normalization
pub fn required_raw_columns() -> Vec<&'static str> {
    CANONICAL_COLUMNS
        .iter()
        .filter(|c| c.required)
        .map(|c| c.internal)
        .collect()
}

/// Consequence vocabulary, one `is_<term>` column each. Order is the model's column order.
pub const CONSEQUENCE_TERMS: [&str; 36] = [
    "regulatory_region_variant",
    "regulatory_region_ablation",
    "regulatory_region_amplification",
    "missense_variant",
    "intron_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "synonymous_variant",
    "TF_binding_site_variant",
    "splice_donor_variant",
    "coding_sequence_variant",
    "splice_region_variant",
    "stop_gained",
    "splice_acceptor_variant",
    "frameshift_variant",
    "3_prime_UTR_variant",
    "inframe_insertion",
    "inframe_deletion",
    "5_prime_UTR_variant",
    "start_lost",
    "non_coding_transcript_exon_variant",
    "non_coding_transcript_variant",
    "TFBS_ablation",
    "TFBS_amplification",
    "protein_altering_variant",
    "stop_lost",
    "stop_retained_variant",
    "transcript_ablation",
    "intergenic_variant",
    "start_retained_variant",
    "transcript_amplification",
    "incomplete_terminal_codon_variant",
    "mature_miRNA_variant",
    "NMD_transcript_variant",
    "feature_elongation",
    "feature_truncation",
];

/// Exported columns, in output order
pub const OUTPUT_COLUMNS: [&str; 11] = [
    column::CHR,
    column::POS,
    column::REF,
    column::ALT,
    column::GENE_NAME,
    column::GENE_ID,
    column::ID_SOURCE,
    column::FEATURE,
    column::FEATURE_TYPE,
    column::SCORE,
    column::SUGGESTED_CLASS,
];

/// Replacement for categorical values the model was not trained on
pub const OTHER_CATEGORY: &str = "other_CAPICE_value";

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_consequence_terms_unique() {
        let unique: FxHashSet<&str> = CONSEQUENCE_TERMS.iter().copied().collect();
        assert_eq!(unique.len(), 36);
    }

    #[test]
    fn test_internal_name_lookup() {
        assert_eq!(internal_name("CHROM"), Some("chr"));
        assert_eq!(internal_name("SYMBOL"), Some("gene_name"));
        assert_eq!(internal_name("EXON"), Some("Exon"));
        assert_eq!(internal_name("Consequence"), None);
    }

    #[test]
    fn test_required_raw_columns() {
        let required = required_raw_columns();
        assert!(required.contains(&"chr"));
        assert!(required.contains(&"feature"));
        assert!(!required.contains(&"feature_type"));
        assert!(!required.contains(&"Exon"));
    }
}

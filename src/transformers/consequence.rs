//! Consequence one-hot encoding
//!
//! A record's consequence is an `&`-joined set of Sequence Ontology terms
//! (`missense_variant&splice_region_variant`). Each supported term gets its
//! own `is_<term>` Int64 column. Terms outside the vocabulary are counted and
//! reported once per distinct term.

use crate::error::Result;
use crate::schema::CONSEQUENCE_TERMS;
use crate::utils::string_values;
use polars::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::warn;

pub fn process(df: &mut DataFrame, source: &str, columns: &[String]) -> Result<()> {
    let values = string_values(df, source)?;
    let n_rows = values.len();

    let term_index: FxHashMap<&str, usize> = CONSEQUENCE_TERMS
        .iter()
        .enumerate()
        .map(|(i, term)| (*term, i))
        .collect();

    let mut flags: Vec<Vec<i64>> = (0..CONSEQUENCE_TERMS.len())
        .map(|_| Vec::with_capacity(n_rows))
        .collect();
    let mut unsupported: FxHashSet<String> = FxHashSet::default();

    for value in &values {
        let terms: SmallVec<[&str; 4]> = value
            .map(|v| v.split('&').filter(|t| !t.is_empty()).collect())
            .unwrap_or_default();

        let mut row = [0i64; CONSEQUENCE_TERMS.len()];
        for term in &terms {
            match term_index.get(term) {
                Some(&i) => row[i] = 1,
                None => {
                    unsupported.insert((*term).to_string());
                }
            }
        }
        for (column_flags, flag) in flags.iter_mut().zip(row) {
            column_flags.push(flag);
        }
    }

    if !unsupported.is_empty() {
        let mut terms: Vec<String> = unsupported.into_iter().collect();
        terms.sort();
        for term in &terms {
            warn!("unsupported consequence term '{}' ignored", term);
        }
    }

    for (name, column_flags) in columns.iter().zip(flags) {
        df.with_column(Series::new(name.as_str().into(), column_flags))?;
    }
    Ok(())
}

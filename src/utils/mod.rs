//! Utility modules for the variant pipeline
//!
//! - Columns: typed column access and missing-column collection

pub mod columns;

pub use columns::{
    float_values, has_column, is_all_null, is_textual, missing_columns, null_series, string_values,
};

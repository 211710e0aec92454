//! Column-level cleaning operations on an in-memory [`DataFrame`](polars::prelude::DataFrame).
//!
//! Every operation borrows the frame, validates the column names it was given,
//! and returns a new frame (plus a report where there is something to report).
//! Nothing here holds on to a frame after returning.

pub mod cleaning;
pub mod conversion;
pub mod io;
pub mod missing;
pub mod naming;
pub mod outliers;
pub mod profiling;
pub mod types;
pub mod validation;

pub use cleaning::{
    capitalise_words, normalise_case, remove_duplicates, strip_titles, title_case,
    trim_whitespace,
};
pub use conversion::{convert_types, parse_datetime};
pub use io::{csv_bytes, export_csv, load_csv, write_csv};
pub use missing::{drop_missing, impute_missing, rows_with_missing};
pub use naming::{standardise_column_name, standardise_column_names};
pub use outliers::detect_outliers;
pub use profiling::{inspect, preview, unique_values};
pub use types::{
    ColumnInfo, ConversionIssue, ConversionReport, DropReport, ImputeMethod, ImputeReport,
    OutlierReport, TargetType, TextCase, column_names,
};
pub use validation::{
    is_valid_email, is_valid_phone, validate_email_addresses, validate_phone_numbers,
};

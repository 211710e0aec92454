use super::types::{resolve_column, text_values};
use crate::error::Result;
use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

pub const VALID_PHONE_COLUMN: &str = "valid_phone";
pub const VALID_EMAIL_COLUMN: &str = "valid_email";

// Optional +91 country code, then a 10-digit mobile number starting 6-9.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+91[-\s]?)?[6-9][0-9]{9}$").expect("static pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("static pattern"));

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Appends (or overwrites) a boolean flag column computed from `source`.
/// Missing cells are flagged `false`.
fn flag_column(
    df: &DataFrame,
    source: &str,
    flag_name: &str,
    is_valid: fn(&str) -> bool,
) -> Result<DataFrame> {
    let series = resolve_column(df, source)?;
    let flags: Vec<bool> = text_values(series)?
        .iter()
        .map(|v| v.as_deref().is_some_and(is_valid))
        .collect();

    let valid = flags.iter().filter(|f| **f).count();
    tracing::info!(
        "{valid} of {} values in '{source}' passed the {flag_name} check",
        flags.len()
    );

    let mut out = df.clone();
    out.with_column(Series::new(flag_name.into(), flags))?;
    Ok(out)
}

pub fn validate_phone_numbers(df: &DataFrame, column: &str) -> Result<DataFrame> {
    flag_column(df, column, VALID_PHONE_COLUMN, is_valid_phone)
}

pub fn validate_email_addresses(df: &DataFrame, column: &str) -> Result<DataFrame> {
    flag_column(df, column, VALID_EMAIL_COLUMN, is_valid_email)
}

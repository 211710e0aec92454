use crate::error::Result;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("static pattern"));

/// Canonical form of a single column name: trimmed, lowercased, and every
/// character outside `[a-zA-Z0-9_]` replaced with `_`.
pub fn standardise_column_name(name: &str) -> String {
    NON_IDENTIFIER
        .replace_all(&name.trim().to_lowercase(), "_")
        .into_owned()
}

/// Canonicalises a list of names, left to right.
///
/// When a canonical name is already taken, the first free `_1`, `_2`, ...
/// suffix is appended. A list that is already canonical and unique maps to
/// itself, so applying this twice gives the same result as applying it once.
pub fn standardise_column_names_list(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cleaned_names = Vec::with_capacity(names.len());

    for name in names {
        let clean_base = standardise_column_name(name);
        let mut clean = clean_base.clone();
        let mut count = 0;

        while seen.contains(&clean) {
            count += 1;
            clean = format!("{clean_base}_{count}");
        }

        seen.insert(clean.clone());
        cleaned_names.push(clean);
    }
    cleaned_names
}

/// Renames every column of `df` to its canonical form. Row data is untouched.
pub fn standardise_column_names(df: &DataFrame) -> Result<DataFrame> {
    let old_names = super::types::column_names(df);
    let new_names = standardise_column_names_list(&old_names);

    for (old, new) in old_names.iter().zip(&new_names) {
        if old != new {
            tracing::debug!("Renaming column '{old}' -> '{new}'");
        }
    }

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(new_names)
        .map(|(column, name)| column.clone().with_name(name.into()))
        .collect();

    Ok(DataFrame::new(columns)?)
}

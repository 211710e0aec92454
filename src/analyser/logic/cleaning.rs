use super::types::{TextCase, resolve_column, resolve_columns, text_values};
use crate::error::{Result, ScourError};
use polars::prelude::*;

/// One leading honorific with its optional period and trailing whitespace.
const LEADING_TITLE: &str = r"^(?i:mrs|mr|ms|dr|shri)\b\.?\s*";

/// Rewrites each target column as text through the string expression `f`.
/// Null in, null out, so missing cells stay missing.
fn with_text_exprs<F>(df: &DataFrame, columns: &[String], f: F) -> Result<DataFrame>
where
    F: Fn(Expr) -> Expr,
{
    resolve_columns(df, columns)?;

    let mut targets: Vec<&str> = Vec::with_capacity(columns.len());
    for name in columns {
        if !targets.contains(&name.as_str()) {
            targets.push(name);
        }
    }

    let exprs: Vec<Expr> = targets
        .into_iter()
        .map(|name| f(col(name).cast(DataType::String)).alias(name))
        .collect();

    Ok(df.clone().lazy().with_columns(exprs).collect()?)
}

pub fn trim_whitespace(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    with_text_exprs(df, columns, |e| e.str().strip_chars(lit(NULL)))
}

pub fn normalise_case(df: &DataFrame, columns: &[String], case: TextCase) -> Result<DataFrame> {
    match case {
        TextCase::Lower => with_text_exprs(df, columns, |e| e.str().to_lowercase()),
        TextCase::Upper => with_text_exprs(df, columns, |e| e.str().to_uppercase()),
    }
}

pub fn capitalise_words(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let targets = resolve_columns(df, columns)?;
    let mut out = df.clone();

    for series in targets {
        let values: Vec<Option<String>> = text_values(series)?
            .into_iter()
            .map(|v| v.map(|s| title_case(&s)))
            .collect();
        out.with_column(Series::new(series.name().clone(), values))?;
    }

    Ok(out)
}

/// Uppercases the first character of every whitespace-separated token and
/// lowercases the rest. Whitespace runs are kept as they are.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_token_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_token_start = true;
        } else if at_token_start {
            out.extend(c.to_uppercase());
            at_token_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Removes one leading honorific (Mr, Mrs, Ms, Dr, Shri) from every name in
/// `column`. Titles later in the string are left alone.
pub fn strip_titles(df: &DataFrame, column: &str) -> Result<DataFrame> {
    with_text_exprs(df, &[column.to_owned()], |e| {
        e.str().replace(lit(LEADING_TITLE), lit(""), false)
    })
}

/// Keeps the first row of every distinct combination of values in `columns`,
/// preserving the original row order. Missing compares equal to missing.
pub fn remove_duplicates(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    if columns.is_empty() {
        return Err(ScourError::InvalidArgument(
            "duplicate removal needs at least one key column".to_owned(),
        ));
    }
    for name in columns {
        resolve_column(df, name)?;
    }

    let deduped = df.unique_stable(Some(columns), UniqueKeepStrategy::First, None)?;
    tracing::info!(
        "Removed {} duplicate rows on key {columns:?}",
        df.height() - deduped.height()
    );
    Ok(deduped)
}

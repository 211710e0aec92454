use super::types::{
    DropReport, ImputeMethod, ImputeReport, ImputedColumn, column_names, is_numeric_column,
    resolve_columns,
};
use crate::error::Result;
use polars::prelude::*;

/// True for every row where at least one of `columns` is missing.
/// An empty column list checks every column.
fn missing_mask(df: &DataFrame, columns: &[String]) -> Result<BooleanChunked> {
    let names = if columns.is_empty() {
        column_names(df)
    } else {
        columns.to_vec()
    };

    let mut any_missing = BooleanChunked::full("missing".into(), false, df.height());
    for series in resolve_columns(df, &names)? {
        any_missing = &any_missing | &series.is_null();
    }
    Ok(any_missing)
}

/// The rows `drop_missing` would remove, for previewing before committing.
pub fn rows_with_missing(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mask = missing_mask(df, columns)?;
    Ok(df.filter(&mask)?)
}

/// Removes every row where any of `columns` holds a missing value.
pub fn drop_missing(df: &DataFrame, columns: &[String]) -> Result<(DataFrame, DropReport)> {
    let mask = missing_mask(df, columns)?;
    let kept = df.filter(&!&mask)?;

    let report = DropReport {
        columns: columns.to_vec(),
        rows_before: df.height(),
        rows_removed: df.height() - kept.height(),
    };
    tracing::info!(
        "Dropped {} of {} rows with missing values",
        report.rows_removed,
        report.rows_before
    );
    Ok((kept, report))
}

/// Fills missing cells of every numeric column with a statistic computed over
/// that column's present values. Non-numeric columns are untouched. Float `NaN`
/// counts as missing: it is excluded from the statistic and filled like null.
///
/// Present values are never rewritten. Integer columns keep their dtype when the
/// statistic is integral and widen to `Float64` otherwise.
///
/// A column with no present values has no defined statistic; it is left as is
/// and listed in the report's `skipped` entries.
pub fn impute_missing(df: &DataFrame, method: ImputeMethod) -> Result<(DataFrame, ImputeReport)> {
    let mut out = df.clone();
    let mut report = ImputeReport {
        method,
        imputed: Vec::new(),
        skipped: Vec::new(),
    };

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if !is_numeric_column(series) {
            continue;
        }
        let filled = missing_count(series)?;
        if filled == 0 {
            continue;
        }

        let name = series.name().to_string();
        let values = present_values(series);
        let stat = statistic(values.clone(), method);

        let Some(fill) = scalar_f64(df, stat.clone())? else {
            tracing::warn!(
                "Column '{name}' has no present values; {} is undefined",
                method.as_str()
            );
            report
                .skipped
                .push((name, "no present values to impute from".to_owned()));
            continue;
        };

        let dtype = series.dtype().clone();
        let fill_expr = if dtype.is_integer() && fill.fract() != 0.0 {
            stat.cast(DataType::Float64)
        } else {
            stat.cast(dtype)
        };
        out = out
            .lazy()
            .with_column(values.fill_null(fill_expr).alias(name.as_str()))
            .collect()?;

        tracing::debug!("Imputed {filled} cells in '{name}' with {fill}");
        report.imputed.push(ImputedColumn {
            column: name,
            filled,
            value: fill,
        });
    }

    Ok((out, report))
}

/// Nulls plus, for float columns, NaNs.
fn missing_count(series: &Series) -> Result<usize> {
    let nan = if series.dtype().is_float() {
        series.is_nan()?.sum().unwrap_or(0) as usize
    } else {
        0
    };
    Ok(series.null_count() + nan)
}

/// The column as an expression with NaN turned into null.
pub(crate) fn present_values(series: &Series) -> Expr {
    let values = col(series.name().clone());
    if series.dtype().is_float() {
        values.fill_nan(lit(NULL))
    } else {
        values
    }
}

fn statistic(values: Expr, method: ImputeMethod) -> Expr {
    match method {
        ImputeMethod::Mean => values.mean(),
        ImputeMethod::Median => values.median(),
        // Ties go to the smallest value.
        ImputeMethod::Mode => values
            .drop_nulls()
            .mode()
            .sort(SortOptions::default())
            .first(),
    }
}

/// Evaluates a single-value aggregate against `df` as `f64`.
pub(crate) fn scalar_f64(df: &DataFrame, expr: Expr) -> Result<Option<f64>> {
    let out = df
        .clone()
        .lazy()
        .select([expr.cast(DataType::Float64).alias("value")])
        .collect()?;
    let value = out.column("value")?.as_materialized_series().f64()?.get(0);
    Ok(value.filter(|v| v.is_finite()))
}

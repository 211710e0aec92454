use super::types::{ColumnInfo, resolve_column};
use crate::error::Result;
use polars::prelude::*;

/// Type, missing count and distinct non-missing count for every column.
pub fn inspect(df: &DataFrame) -> Result<Vec<ColumnInfo>> {
    df.get_columns()
        .iter()
        .map(|column| {
            let series = column.as_materialized_series();
            Ok(ColumnInfo {
                name: series.name().to_string(),
                dtype: series.dtype().to_string(),
                null_count: series.null_count(),
                unique_count: series.drop_nulls().n_unique()?,
            })
        })
        .collect()
}

/// Distinct non-missing values of one column, in first-seen order, as text.
pub fn unique_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = resolve_column(df, column)?;
    let distinct = series.drop_nulls().unique_stable()?.cast(&DataType::String)?;
    Ok(distinct
        .str()?
        .into_iter()
        .flatten()
        .map(ToOwned::to_owned)
        .collect())
}

/// First `rows` rows of the frame.
pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
    df.head(Some(rows))
}

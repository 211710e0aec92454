use super::missing::{present_values, scalar_f64};
use super::types::{OutlierReport, is_numeric_column};
use crate::error::Result;
use polars::prelude::*;

pub const Z_SCORE_THRESHOLD: f64 = 3.0;

/// Number of values whose population z-score magnitude exceeds the threshold.
///
/// Missing and `NaN` cells are ignored. Constant columns (zero spread) and
/// empty columns have no defined z-score and count as having no outliers.
pub fn count_outliers(series: &Series) -> Result<usize> {
    let df = series.clone().into_frame();
    let values = present_values(series).cast(DataType::Float64);

    let std_dev = scalar_f64(&df, values.clone().std(0))?;
    if !std_dev.is_some_and(|s| s > 0.0) {
        return Ok(0);
    }

    let z = (values.clone() - values.clone().mean()) / values.std(0);
    let beyond = (z.clone() * z).gt(lit(Z_SCORE_THRESHOLD * Z_SCORE_THRESHOLD));
    let count = scalar_f64(&df, beyond.sum())?;
    Ok(count.map_or(0, |c| c as usize))
}

/// Scans every numeric column and reports those with at least one outlier.
pub fn detect_outliers(df: &DataFrame) -> Result<OutlierReport> {
    let mut report = OutlierReport::new();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if !is_numeric_column(series) {
            continue;
        }

        let count = count_outliers(series)?;
        tracing::debug!("Column '{}': {count} outliers", series.name());
        if count > 0 {
            report.insert(series.name().to_string(), count);
        }
    }

    Ok(report)
}

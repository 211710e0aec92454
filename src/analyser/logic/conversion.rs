use super::types::{ConversionIssue, ConversionReport, TargetType, text_values};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d %b %Y", "%d %B %Y",
    "%b %d, %Y", "%B %d, %Y", "%Y%m%d",
];

/// Parses a date or date-time in any of the common layouts. Day-first wins over
/// month-first when both read as valid dates.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| parse_float(s).and_then(integral))
}

fn integral(v: f64) -> Option<i64> {
    // Bounds are the closest f64 values inside the i64 range.
    (v.fract() == 0.0 && v >= -9.223_372_036_854_775e18 && v <= 9.223_372_036_854_775e18)
        .then_some(v as i64)
}

/// Present floats of a numeric or boolean column, index-aligned with its rows.
fn float_cells(series: &Series) -> Result<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

fn coerce(series: &Series, target: TargetType) -> Result<Series> {
    let name = series.name().clone();
    let dtype = series.dtype();

    let converted = match target {
        TargetType::Text => series.cast(&DataType::String)?,
        TargetType::Integer if dtype.is_integer() => series.cast(&DataType::Int64)?,
        TargetType::Integer if dtype.is_primitive_numeric() || dtype.is_bool() => {
            let values: Vec<Option<i64>> = float_cells(series)?
                .into_iter()
                .map(|v| v.and_then(integral))
                .collect();
            Series::new(name, values)
        }
        TargetType::Integer => {
            let values: Vec<Option<i64>> = text_values(series)?
                .into_iter()
                .map(|v| v.as_deref().and_then(parse_integer))
                .collect();
            Series::new(name, values)
        }
        TargetType::Float if dtype.is_primitive_numeric() || dtype.is_bool() => {
            series.cast(&DataType::Float64)?
        }
        TargetType::Float => {
            let values: Vec<Option<f64>> = text_values(series)?
                .into_iter()
                .map(|v| v.as_deref().and_then(parse_float))
                .collect();
            Series::new(name, values)
        }
        TargetType::Datetime if dtype.is_temporal() => {
            series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        TargetType::Datetime => {
            let millis: Vec<Option<i64>> = text_values(series)?
                .into_iter()
                .map(|v| {
                    v.as_deref()
                        .and_then(parse_datetime)
                        .map(|dt| dt.and_utc().timestamp_millis())
                })
                .collect();
            Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
    };
    Ok(converted)
}

/// Converts each listed column to its target type.
///
/// Columns are handled independently: cells that parse are kept, cells that do
/// not become missing, and every column that lost values (or does not exist) is
/// reported as a [`ConversionIssue`] without stopping the rest of the batch.
pub fn convert_types(
    df: &DataFrame,
    conversions: &[(String, TargetType)],
) -> Result<(DataFrame, ConversionReport)> {
    let mut out = df.clone();
    let mut report = ConversionReport::default();

    for (name, target) in conversions {
        let target = *target;
        let Ok(column) = df.column(name) else {
            tracing::warn!("Cannot convert '{name}' to {target}: column does not exist");
            report.issues.push(ConversionIssue {
                column: name.clone(),
                target,
                reason: "column does not exist".to_owned(),
            });
            continue;
        };
        let series = column.as_materialized_series();

        let converted = match coerce(series, target) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Error converting '{name}' to {target}: {e}");
                report.issues.push(ConversionIssue {
                    column: name.clone(),
                    target,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let lost = converted.null_count().saturating_sub(series.null_count());
        if lost > 0 {
            tracing::warn!(
                "Converting '{name}' to {target}: {lost} of {} values could not be parsed",
                series.len() - series.null_count()
            );
            report.issues.push(ConversionIssue {
                column: name.clone(),
                target,
                reason: format!(
                    "{lost} of {} values could not be parsed as {target} and were set to missing",
                    series.len() - series.null_count()
                ),
            });
        }

        out.with_column(converted)?;
        report.converted.push(name.clone());
    }

    Ok((out, report))
}

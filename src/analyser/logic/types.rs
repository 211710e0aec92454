use crate::error::{Result, ScourError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// COLUMN ACCESS

/// Column names in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

/// Resolves a single column name, failing fast if the frame does not have it.
pub fn resolve_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(Column::as_materialized_series)
        .map_err(|_| ScourError::UnknownColumn(name.to_owned()))
}

/// Resolves every requested name up front so no work starts on a bad list.
pub fn resolve_columns<'a>(df: &'a DataFrame, names: &[String]) -> Result<Vec<&'a Series>> {
    names.iter().map(|n| resolve_column(df, n)).collect()
}

/// Text form of every cell, with missing cells kept as `None`.
pub fn text_values(series: &Series) -> Result<Vec<Option<String>>> {
    let as_text = series.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.map(ToOwned::to_owned))
        .collect())
}

/// Numeric in the statistical sense: booleans are excluded.
pub fn is_numeric_column(series: &Series) -> bool {
    let dtype = series.dtype();
    dtype.is_primitive_numeric() && !dtype.is_bool()
}

// OPERATION PARAMETERS

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    #[default]
    Lower,
    Upper,
}

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ImputeMethod {
    #[default]
    Mean,
    Median,
    Mode,
}

impl ImputeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

/// Target of a type conversion.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    #[serde(alias = "int")]
    Integer,
    Float,
    #[serde(alias = "str")]
    Text,
    Datetime,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Datetime => "datetime",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// REPORTS

/// One row of the inspection summary.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub unique_count: usize,
}

/// Numeric column name to the number of values with |z| > 3.
pub type OutlierReport = BTreeMap<String, usize>;

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ConversionIssue {
    pub column: String,
    pub target: TargetType,
    pub reason: String,
}

impl From<ConversionIssue> for ScourError {
    fn from(issue: ConversionIssue) -> Self {
        Self::Conversion {
            column: issue.column,
            reason: issue.reason,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct ConversionReport {
    /// Columns whose dtype was changed, including those with partial failures.
    pub converted: Vec<String>,
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct DropReport {
    pub columns: Vec<String>,
    pub rows_before: usize,
    pub rows_removed: usize,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ImputedColumn {
    pub column: String,
    pub filled: usize,
    pub value: f64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ImputeReport {
    pub method: ImputeMethod,
    pub imputed: Vec<ImputedColumn>,
    /// Numeric columns left untouched, with the reason.
    pub skipped: Vec<(String, String)>,
}

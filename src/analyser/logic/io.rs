use crate::error::{Result, ResultExt as _, ScourError};
use polars::prelude::*;
use std::io::Write;
use std::path::Path;

/// Reads a comma-separated file with a header row.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext != "csv" {
        return Err(ScourError::InvalidArgument(format!(
            "Unsupported file extension '{ext}', expected a .csv file"
        )));
    }

    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("Failed to read CSV '{}'", path.display()))
}

/// Serializes `df` as UTF-8 CSV: header row of column names, comma separator,
/// missing cells written as empty fields.
pub fn write_csv<W: Write>(df: &DataFrame, writer: &mut W) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .with_null_value(String::new())
        .finish(&mut df)
        .context("Failed to serialize dataframe to CSV")
}

pub fn csv_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(df, &mut buf)?;
    Ok(buf)
}

pub fn export_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    write_csv(df, &mut file)?;
    tracing::info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

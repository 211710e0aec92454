use crate::error::{Result, ResultExt as _, ScourError};
use chrono::NaiveDateTime;
use polars::prelude::*;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{Pool, Postgres, Row as _};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const COPY_CHUNK_ROWS: usize = 10_000;

/// A schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Parses `schema.table`, falling back to `default_schema` for a bare name.
    pub fn parse(input: &str, default_schema: &str) -> Result<Self> {
        let input = input.trim();
        let (schema, name) = match input.split_once('.') {
            Some((schema, name)) => (schema.trim(), name.trim()),
            None => (default_schema, input),
        };
        if schema.is_empty() || name.is_empty() {
            return Err(ScourError::InvalidArgument(format!(
                "Invalid table reference '{input}'"
            )));
        }
        Ok(Self::new(schema, name))
    }

    fn quoted(&self) -> String {
        format!("{}.{}", quote(&self.schema), quote(&self.name))
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// How a fetched column is decoded. Everything the server can't express as one
/// of the numeric, boolean or timestamp kinds comes back as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Integer,
    Float,
    Boolean,
    Timestamp,
    /// `timestamptz`, converted to UTC on the server so the session time zone
    /// does not leak into the naive value.
    TimestampUtc,
    Text,
}

impl FetchKind {
    fn from_sql(data_type: &str) -> Self {
        match data_type {
            "smallint" | "integer" | "bigint" => Self::Integer,
            "real" | "double precision" | "numeric" => Self::Float,
            "boolean" => Self::Boolean,
            "date" | "timestamp without time zone" => Self::Timestamp,
            "timestamp with time zone" => Self::TimestampUtc,
            _ => Self::Text,
        }
    }

    fn cast(self) -> &'static str {
        match self {
            Self::Integer => "bigint",
            Self::Float => "double precision",
            Self::Boolean => "boolean",
            Self::Timestamp | Self::TimestampUtc => "timestamp",
            Self::Text => "text",
        }
    }

    fn select_expr(self, column: &str) -> String {
        let column = quote(column);
        match self {
            Self::TimestampUtc => format!("({column} AT TIME ZONE 'UTC')::timestamp"),
            _ => format!("{column}::{}", self.cast()),
        }
    }
}

fn sql_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "BIGINT",
        DataType::Float32 | DataType::Float64 => "DOUBLE PRECISION",
        DataType::Boolean => "BOOLEAN",
        DataType::Date => "DATE",
        DataType::Datetime(_, _) => "TIMESTAMP",
        _ => "TEXT",
    }
}

fn decode_column(rows: &[PgRow], idx: usize, name: &str, kind: FetchKind) -> Result<Series> {
    let name = PlSmallStr::from(name);
    let series = match kind {
        FetchKind::Integer => Series::new(
            name,
            rows.iter()
                .map(|r| r.try_get::<Option<i64>, _>(idx))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
        FetchKind::Float => Series::new(
            name,
            rows.iter()
                .map(|r| r.try_get::<Option<f64>, _>(idx))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
        FetchKind::Boolean => Series::new(
            name,
            rows.iter()
                .map(|r| r.try_get::<Option<bool>, _>(idx))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
        FetchKind::Timestamp | FetchKind::TimestampUtc => {
            let millis = rows
                .iter()
                .map(|r| {
                    r.try_get::<Option<NaiveDateTime>, _>(idx)
                        .map(|v| v.map(|ts| ts.and_utc().timestamp_millis()))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        FetchKind::Text => Series::new(
            name,
            rows.iter()
                .map(|r| r.try_get::<Option<String>, _>(idx))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
    };
    Ok(series)
}

pub struct DbClient {
    pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn connect(
        options: PgConnectOptions,
        timeout: Duration,
        max_connections: u32,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                ScourError::Connection(format!(
                    "Failed to connect to PostgreSQL (timeout after {}s): {e}",
                    timeout.as_secs()
                ))
            })?;
        Ok(Self { pool })
    }

    /// Connects from a `postgres://` URL.
    pub async fn connect_url(url: &str, timeout: Duration, max_connections: u32) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| ScourError::Connection(format!("Invalid database URL: {e}")))?;
        Self::connect(options, timeout, max_connections).await
    }

    async fn column_kinds(&self, table: &TableRef) -> Result<Vec<(String, FetchKind)>> {
        let rows = sqlx::query(
            "SELECT column_name::text, data_type::text FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 ORDER BY ordinal_position",
        )
        .bind(&table.schema)
        .bind(&table.name)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to read column metadata for {table}"))?;

        if rows.is_empty() {
            return Err(ScourError::Query(format!(
                "Table {table} does not exist or has no columns"
            )));
        }

        rows.iter()
            .map(|row| {
                let name: String = row.try_get(0)?;
                let data_type: String = row.try_get(1)?;
                Ok((name, FetchKind::from_sql(&data_type)))
            })
            .collect()
    }

    /// Reads the whole table into memory, one typed column per table column.
    pub async fn fetch_table(&self, table: &TableRef) -> Result<DataFrame> {
        let columns = self.column_kinds(table).await?;

        let select_list = columns
            .iter()
            .map(|(name, kind)| kind.select_expr(name))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT {select_list} FROM {}", table.quoted());

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch {table}"))?;

        let series = columns
            .iter()
            .enumerate()
            .map(|(idx, (name, kind))| decode_column(&rows, idx, name, *kind).map(Column::from))
            .collect::<Result<Vec<_>>>()?;

        let df = DataFrame::new(series)?;
        tracing::info!(
            "Fetched {table}: {} rows x {} columns",
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Drops `table`, recreates it from the frame's schema and loads the rows.
    ///
    /// All three steps run in one transaction; if any fails the existing table
    /// is left as it was.
    pub async fn replace_table(&self, df: &DataFrame, table: &TableRef) -> Result<()> {
        let full_identifier = table.quoted();

        let column_definitions = df
            .schema()
            .iter()
            .map(|(name, dtype)| format!("{} {}", quote(name), sql_type(dtype)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {full_identifier}"))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to drop {table}"))?;

        sqlx::query(&format!(
            "CREATE TABLE {full_identifier} ({column_definitions})"
        ))
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to create {table}"))?;

        let mut writer = tx
            .copy_in_raw(&format!(
                "COPY {full_identifier} FROM STDIN WITH (FORMAT csv, NULL '')"
            ))
            .await
            .context("Failed to initiate COPY command")?;

        let height = df.height();
        for offset in (0..height).step_by(COPY_CHUNK_ROWS) {
            let len = COPY_CHUNK_ROWS.min(height - offset);
            let mut chunk = df.slice(offset as i64, len);

            let mut buf = Vec::new();
            CsvWriter::new(&mut buf)
                .include_header(false)
                .with_separator(b',')
                .with_null_value(String::new())
                .finish(&mut chunk)
                .context("Failed to serialize dataframe chunk to CSV")?;

            writer
                .send(buf)
                .await
                .context("Failed to send data chunk via COPY")?;
        }

        writer
            .finish()
            .await
            .context("Failed to finish COPY command")?;

        tx.commit().await.context("Failed to commit replacement")?;

        tracing::info!("Replaced {table} with {height} rows");
        Ok(())
    }
}

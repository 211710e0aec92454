//! Centralized error handling for scour.
//!
//! Every fallible library operation returns [`Result<T>`], an alias over
//! [`ScourError`]. The variants follow the failure classes a cleaning session
//! can hit:
//!
//! - [`ScourError::Connection`] and [`ScourError::Query`] come from the data
//!   source. They are fatal to the action that triggered them only; the session
//!   keeps its last good dataset.
//! - [`ScourError::Conversion`] describes a single column that failed type
//!   coercion. The type converter collects these into a report instead of
//!   returning them, so one bad column never aborts a batch.
//! - [`ScourError::UnknownColumn`] is raised when an operation is handed a column
//!   name the dataset does not have. Names are resolved before any work starts.
//!
//! Validation mismatches (a malformed phone number, say) are not errors at all;
//! they show up as `false` in a flag column.
//!
//! ```
//! use scour::error::ScourError;
//!
//! fn describe(err: &ScourError) -> &'static str {
//!     match err {
//!         ScourError::Connection(_) => "check the server address",
//!         ScourError::UnknownColumn(_) => "check the recipe column names",
//!         _ => "see the log for details",
//!     }
//! }
//! # assert_eq!(describe(&ScourError::Config("x".into())), "see the log for details");
//! ```

use std::fmt;

/// Main error type for scour operations.
#[derive(Debug)]
pub enum ScourError {
    /// I/O errors (files, sockets)
    Io(std::io::Error),

    /// The data source could not be reached
    Connection(String),

    /// The data source was reached but the fetch or write failed
    Query(String),

    /// A column could not be coerced to the requested type
    Conversion { column: String, reason: String },

    /// A column name that does not exist in the dataset
    UnknownColumn(String),

    /// An operation was called with arguments it cannot act on
    InvalidArgument(String),

    /// Dataframe processing errors (Polars, CSV)
    DataProcessing(String),

    /// Configuration and recipe errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ScourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::Query(msg) => write!(f, "Query error: {msg}"),
            Self::Conversion { column, reason } => {
                write!(f, "Conversion error in column '{column}': {reason}")
            }
            Self::UnknownColumn(name) => write!(f, "Unknown column: '{name}'"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ScourError {}

impl From<std::io::Error> for ScourError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ScourError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for ScourError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<sqlx::Error> for ScourError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => Self::Connection(err.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<ScourError> for String {
    fn from(err: ScourError) -> Self {
        err.to_string()
    }
}

/// Result type alias for scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ScourError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Connection and query failures keep their class so callers can still match on them.
fn wrap(err: ScourError, msg: String) -> ScourError {
    match err {
        ScourError::Connection(inner) => ScourError::Connection(format!("{msg}: {inner}")),
        ScourError::Query(inner) => ScourError::Query(format!("{msg}: {inner}")),
        other => ScourError::Other(format!("{msg}: {other}")),
    }
}

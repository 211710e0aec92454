//! A single cleaning session over one table.
//!
//! The session owns two frames: the `original` as fetched (kept for backups) and
//! the `current` working copy. Operations are applied through [`CleaningSession::apply`],
//! which only swaps the new frame in when the operation succeeds, so a failing
//! step never leaves a half-cleaned table behind.

use crate::error::Result;
use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

const MAX_HISTORY: usize = 1000;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl Into<String>, details: impl Into<String>) {
        self.entries.push(AuditEntry {
            timestamp: Utc::now(),
            action: action.into(),
            details: details.into(),
        });

        if self.entries.len() > MAX_HISTORY {
            self.entries.drain(0..self.entries.len() - MAX_HISTORY);
        }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub struct CleaningSession {
    source: String,
    original: DataFrame,
    current: DataFrame,
    history: AuditLog,
}

impl CleaningSession {
    /// Starts a session from a freshly fetched frame.
    pub fn new(source: impl Into<String>, df: DataFrame) -> Self {
        let source = source.into();
        let mut history = AuditLog::new();
        history.push(
            "fetch",
            format!("{source}: {} rows x {} columns", df.height(), df.width()),
        );
        Self {
            source,
            original: df.clone(),
            current: df,
            history,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn original(&self) -> &DataFrame {
        &self.original
    }

    pub fn current(&self) -> &DataFrame {
        &self.current
    }

    pub fn history(&self) -> &AuditLog {
        &self.history
    }

    /// Runs `op` against the current frame and keeps its output on success.
    /// On failure the current frame is left exactly as it was.
    pub fn apply<T, F>(&mut self, action: &str, op: F) -> Result<T>
    where
        F: FnOnce(&DataFrame) -> Result<(DataFrame, T)>,
    {
        match op(&self.current) {
            Ok((next, output)) => {
                let details = format!(
                    "{} -> {} rows, {} -> {} columns",
                    self.current.height(),
                    next.height(),
                    self.current.width(),
                    next.width()
                );
                tracing::info!("Applied {action}: {details}");
                self.history.push(action, details);
                self.current = next;
                Ok(output)
            }
            Err(e) => {
                tracing::warn!("{action} failed, dataset unchanged: {e}");
                self.history.push(format!("{action} (failed)"), e.to_string());
                Err(e)
            }
        }
    }

    /// Same as [`apply`](Self::apply) for operations that only return a frame.
    pub fn apply_frame<F>(&mut self, action: &str, op: F) -> Result<()>
    where
        F: FnOnce(&DataFrame) -> Result<DataFrame>,
    {
        self.apply(action, |df| op(df).map(|next| (next, ())))
    }

    /// Discards all cleaning and returns to the fetched frame.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.history.push("reset", "restored original dataset");
    }
}

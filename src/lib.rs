//! # scour - tidy up messy tables
//!
//! scour fetches a table from PostgreSQL (or reads a CSV file) into a polars
//! [`DataFrame`](polars::prelude::DataFrame), applies a sequence of column-level
//! cleaning operations, and writes the result back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scour::analyser::CleaningSession;
//! use scour::analyser::logic::{self, ImputeMethod};
//! use std::path::Path;
//!
//! let df = logic::load_csv(Path::new("customers.csv"))?;
//! let mut session = CleaningSession::new("customers.csv", df);
//!
//! session.apply_frame("standardise_column_names", logic::standardise_column_names)?;
//! session.apply_frame("trim_whitespace", |df| {
//!     logic::trim_whitespace(df, &["name".to_owned()])
//! })?;
//! let report = session.apply("impute_missing", |df| {
//!     logic::impute_missing(df, ImputeMethod::Median)
//! })?;
//! println!("imputed {} columns", report.imputed.len());
//! # Ok::<(), scour::error::ScourError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: the cleaning session and data sources
//!   - [`analyser::logic`]: the cleaning operations themselves
//!   - [`analyser::db`]: PostgreSQL fetch and replace
//! - [`pipeline`]: JSON recipes that replay a list of operations
//! - [`config`]: user configuration file
//! - [`error`]: error types and handling utilities
//! - [`logging`]: `tracing` subscriber setup for the binary
//!
//! ## Missing values
//!
//! Text operations keep missing cells missing: trimming or re-casing never turns
//! a null into `""`. Validators are the exception; a missing phone number is
//! simply not a valid one, so its flag is `false`.

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

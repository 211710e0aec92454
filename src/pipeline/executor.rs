//! Recipe execution engine.
//!
//! Runs a recipe's steps in order against a [`CleaningSession`]. Each step goes
//! through [`CleaningSession::apply`], so a step that fails is skipped with a
//! warning and the dataset stays as the previous step left it.

use super::recipe::{Recipe, Step};
use super::validation::validate_recipe;
use crate::analyser::logic::types::{ConversionIssue, OutlierReport};
use crate::analyser::logic::{
    capitalise_words, column_names, convert_types, detect_outliers, drop_missing,
    impute_missing, normalise_case, remove_duplicates, standardise_column_names, strip_titles,
    trim_whitespace, validate_email_addresses, validate_phone_numbers,
};
use crate::analyser::session::CleaningSession;
use crate::error::{Result, ScourError};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Report generated after a recipe run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of rows before processing
    pub rows_before: usize,

    /// Number of columns before processing
    pub columns_before: usize,

    /// Number of rows after processing
    pub rows_after: usize,

    /// Number of columns after processing
    pub columns_after: usize,

    /// Number of steps successfully applied
    pub steps_applied: usize,

    /// Warnings generated during execution
    pub warnings: Vec<String>,

    /// Columns that failed (fully or partly) to convert
    pub conversion_issues: Vec<ConversionIssue>,

    /// Result of the last `detect_outliers` step, if any ran
    pub outliers: Option<OutlierReport>,

    /// Time taken for execution
    pub duration: Duration,
}

impl RunReport {
    /// Create a summary message
    pub fn summary(&self) -> String {
        format!(
            "Recipe completed: rows {} -> {}, columns {} -> {}, {} steps applied, {} warnings, {:.2}s",
            self.rows_before,
            self.rows_after,
            self.columns_before,
            self.columns_after,
            self.steps_applied,
            self.warnings.len(),
            self.duration.as_secs_f64()
        )
    }
}

/// Execute a recipe against the session's current dataset.
///
/// Recipe-level problems (wrong version, missing required columns) abort the
/// run before any step executes. Step-level failures are recorded as warnings.
pub fn run_recipe(recipe: &Recipe, session: &mut CleaningSession) -> Result<RunReport> {
    run_recipe_with(recipe, session, |_, _, _| {})
}

/// Same as [`run_recipe`], calling `before_step` with the step's index and the
/// frame it is about to run on.
pub fn run_recipe_with<F>(
    recipe: &Recipe,
    session: &mut CleaningSession,
    mut before_step: F,
) -> Result<RunReport>
where
    F: FnMut(usize, &Step, &DataFrame),
{
    let start = Instant::now();

    let columns = column_names(session.current());
    let fatal: Vec<String> = validate_recipe(recipe, &columns)
        .into_iter()
        .filter(|e| e.step_index.is_none())
        .map(|e| e.to_string())
        .collect();
    if !fatal.is_empty() {
        return Err(ScourError::Config(format!(
            "Recipe '{}' cannot run:\n{}",
            recipe.name,
            fatal.join("\n")
        )));
    }

    let mut report = RunReport {
        rows_before: session.current().height(),
        columns_before: session.current().width(),
        ..RunReport::default()
    };

    tracing::info!(
        "Running recipe '{}' ({} steps) on {}",
        recipe.name,
        recipe.steps.len(),
        session.source()
    );

    for (idx, step) in recipe.steps.iter().enumerate() {
        before_step(idx, step, session.current());
        match apply_step(step, session, &mut report) {
            Ok(()) => report.steps_applied += 1,
            Err(e) => {
                report
                    .warnings
                    .push(format!("Step {} ({}): {e} (skipped)", idx + 1, step.name()));
            }
        }
    }

    report.rows_after = session.current().height();
    report.columns_after = session.current().width();
    report.duration = start.elapsed();

    tracing::info!("{}", report.summary());
    Ok(report)
}

/// Apply a single step to the session
fn apply_step(step: &Step, session: &mut CleaningSession, report: &mut RunReport) -> Result<()> {
    let action = step.name();
    match step {
        Step::StandardiseColumnNames => session.apply_frame(action, standardise_column_names),
        Step::TrimWhitespace { columns } => {
            session.apply_frame(action, |df| trim_whitespace(df, columns))
        }
        Step::NormaliseCase { columns, case } => {
            session.apply_frame(action, |df| normalise_case(df, columns, *case))
        }
        Step::CapitaliseWords { columns } => {
            session.apply_frame(action, |df| capitalise_words(df, columns))
        }
        Step::DropMissing { columns } => {
            let dropped = session.apply(action, |df| drop_missing(df, columns))?;
            tracing::debug!(
                "Dropped {} of {} rows",
                dropped.rows_removed,
                dropped.rows_before
            );
            Ok(())
        }
        Step::ImputeMissing { method } => {
            let imputed = session.apply(action, |df| impute_missing(df, *method))?;
            for (column, reason) in imputed.skipped {
                report
                    .warnings
                    .push(format!("impute_missing skipped '{column}': {reason}"));
            }
            Ok(())
        }
        Step::ConvertTypes { columns } => {
            let targets: Vec<_> = columns
                .iter()
                .map(|(name, target)| (name.clone(), *target))
                .collect();
            let converted = session.apply(action, |df| convert_types(df, &targets))?;
            report.conversion_issues.extend(converted.issues);
            Ok(())
        }
        Step::RemoveDuplicates { columns } => {
            session.apply_frame(action, |df| remove_duplicates(df, columns))
        }
        Step::StripTitles { column } => session.apply_frame(action, |df| strip_titles(df, column)),
        Step::ValidatePhone { column } => {
            session.apply_frame(action, |df| validate_phone_numbers(df, column))
        }
        Step::ValidateEmail { column } => {
            session.apply_frame(action, |df| validate_email_addresses(df, column))
        }
        Step::DetectOutliers => {
            report.outliers = Some(detect_outliers(session.current())?);
            Ok(())
        }
    }
}

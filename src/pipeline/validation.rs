//! Recipe validation.
//!
//! Checks a recipe against the columns of the dataset it will run on before any
//! step executes, so a typo in a column name is reported up front instead of as
//! a skipped step halfway through.

use super::recipe::{RECIPE_VERSION, Recipe, Step};
use crate::analyser::logic::naming::standardise_column_names_list;
use crate::analyser::logic::validation::{VALID_EMAIL_COLUMN, VALID_PHONE_COLUMN};

/// Validation error with helpful context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub step_index: Option<usize>,
    pub message: String,
}

impl ValidationError {
    fn new(step_index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            step_index,
            message: message.into(),
        }
    }

    fn step(step_index: usize, message: impl Into<String>) -> Self {
        Self::new(Some(step_index), message)
    }

    fn schema(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(idx) = self.step_index {
            write!(f, "Step {}: {}", idx + 1, self.message)
        } else {
            write!(f, "Schema: {}", self.message)
        }
    }
}

/// Validate a recipe against the dataset's column names (in frame order).
pub fn validate_recipe(recipe: &Recipe, columns: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if recipe.version != RECIPE_VERSION {
        errors.push(ValidationError::schema(format!(
            "Unsupported recipe version '{}', expected '{RECIPE_VERSION}'",
            recipe.version
        )));
    }

    for required in &recipe.required_columns {
        if !columns.contains(required) {
            errors.push(ValidationError::schema(format!(
                "Required column '{required}' not found in input"
            )));
        }
    }

    // Simulate step-by-step execution to track column changes
    let mut current = columns.to_vec();
    for (idx, step) in recipe.steps.iter().enumerate() {
        validate_step(step, idx, &mut current, &mut errors);
    }

    errors
}

fn require(
    columns: &[String],
    wanted: &[String],
    idx: usize,
    errors: &mut Vec<ValidationError>,
) {
    for name in wanted {
        if !columns.contains(name) {
            errors.push(ValidationError::step(
                idx,
                format!("Column '{name}' not found"),
            ));
        }
    }
}

fn require_one(columns: &[String], wanted: &str, idx: usize, errors: &mut Vec<ValidationError>) {
    require(columns, &[wanted.to_owned()], idx, errors);
}

fn add_flag(columns: &mut Vec<String>, flag: &str) {
    if !columns.iter().any(|c| c == flag) {
        columns.push(flag.to_owned());
    }
}

fn validate_step(
    step: &Step,
    idx: usize,
    columns: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    match step {
        Step::StandardiseColumnNames => {
            *columns = standardise_column_names_list(columns);
        }
        Step::TrimWhitespace { columns: wanted }
        | Step::NormaliseCase { columns: wanted, .. }
        | Step::CapitaliseWords { columns: wanted }
        | Step::DropMissing { columns: wanted } => require(columns, wanted, idx, errors),
        Step::ConvertTypes { columns: wanted } => {
            // Unknown columns here are reported per column at run time, not fatal.
            for name in wanted.keys() {
                if !columns.contains(name) {
                    errors.push(ValidationError::step(
                        idx,
                        format!(
                            "Column '{name}' not found (will be reported as a conversion issue)"
                        ),
                    ));
                }
            }
        }
        Step::RemoveDuplicates { columns: wanted } => {
            if wanted.is_empty() {
                errors.push(ValidationError::step(
                    idx,
                    "remove_duplicates needs at least one key column",
                ));
            }
            require(columns, wanted, idx, errors);
        }
        Step::StripTitles { column } => require_one(columns, column, idx, errors),
        Step::ValidatePhone { column } => {
            require_one(columns, column, idx, errors);
            add_flag(columns, VALID_PHONE_COLUMN);
        }
        Step::ValidateEmail { column } => {
            require_one(columns, column, idx, errors);
            add_flag(columns, VALID_EMAIL_COLUMN);
        }
        Step::ImputeMissing { .. } | Step::DetectOutliers => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::logic::types::TargetType;
    use std::collections::BTreeMap;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_valid_recipe() {
        let recipe = Recipe::new("ok")
            .with_step(Step::TrimWhitespace {
                columns: cols(&["name"]),
            })
            .with_step(Step::RemoveDuplicates {
                columns: cols(&["name", "email"]),
            });

        assert!(validate_recipe(&recipe, &cols(&["name", "email"])).is_empty());
    }

    #[test]
    fn test_tracks_renames_from_standardisation() {
        let recipe = Recipe::new("renames")
            .with_step(Step::StandardiseColumnNames)
            .with_step(Step::TrimWhitespace {
                columns: cols(&["first_name"]),
            })
            .with_step(Step::TrimWhitespace {
                columns: cols(&["First Name"]),
            });

        let errors = validate_recipe(&recipe, &cols(&["First Name"]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].step_index, Some(2));
        assert_eq!(errors[0].to_string(), "Step 3: Column 'First Name' not found");
    }

    #[test]
    fn test_validators_add_flag_columns() {
        let recipe = Recipe::new("flags")
            .with_step(Step::ValidateEmail {
                column: "email".to_owned(),
            })
            .with_step(Step::DropMissing {
                columns: cols(&[VALID_EMAIL_COLUMN]),
            });

        assert!(validate_recipe(&recipe, &cols(&["email"])).is_empty());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut recipe = Recipe::new("broken")
            .with_step(Step::RemoveDuplicates { columns: vec![] })
            .with_step(Step::StripTitles {
                column: "nme".to_owned(),
            })
            .with_step(Step::ConvertTypes {
                columns: BTreeMap::from([("agee".to_owned(), TargetType::Integer)]),
            });
        recipe.version = "9.9".to_owned();
        recipe.required_columns = cols(&["id"]);

        let errors = validate_recipe(&recipe, &cols(&["name"]));
        assert_eq!(errors.len(), 5);
        assert!(errors[0].to_string().starts_with("Schema: Unsupported recipe version"));
        assert!(errors[1].to_string().contains("'id'"));
    }
}

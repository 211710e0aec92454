//! Recipe data structures.
//!
//! A recipe is an ordered list of cleaning steps stored as JSON, so the same
//! clean-up can be replayed against a table every time it is refreshed.

use crate::analyser::logic::types::{ImputeMethod, TargetType, TextCase};
use crate::error::{Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Current recipe format version
pub const RECIPE_VERSION: &str = "0.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Format version for future migrations
    pub version: String,

    /// Human-readable recipe name
    pub name: String,

    /// Columns that must be present before the first step runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_columns: Vec<String>,

    /// Ordered sequence of cleaning steps
    pub steps: Vec<Step>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: RECIPE_VERSION.to_owned(),
            name: name.into(),
            required_columns: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe '{}'", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse recipe JSON")
    }

}

/// One cleaning step (tagged enum)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Lowercase, underscore and de-duplicate every column name
    StandardiseColumnNames,

    TrimWhitespace { columns: Vec<String> },

    NormaliseCase {
        columns: Vec<String>,
        #[serde(default)]
        case: TextCase,
    },

    CapitaliseWords { columns: Vec<String> },

    /// Drop rows missing a value in any of `columns` (all columns when empty)
    DropMissing {
        #[serde(default)]
        columns: Vec<String>,
    },

    /// Fill missing values in every numeric column
    ImputeMissing {
        #[serde(default)]
        method: ImputeMethod,
    },

    ConvertTypes { columns: BTreeMap<String, TargetType> },

    RemoveDuplicates { columns: Vec<String> },

    StripTitles { column: String },

    ValidatePhone { column: String },

    ValidateEmail { column: String },

    /// Report z-score outliers; does not change the data
    DetectOutliers,
}

impl Step {
    /// Operation name as it appears in the recipe file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StandardiseColumnNames => "standardise_column_names",
            Self::TrimWhitespace { .. } => "trim_whitespace",
            Self::NormaliseCase { .. } => "normalise_case",
            Self::CapitaliseWords { .. } => "capitalise_words",
            Self::DropMissing { .. } => "drop_missing",
            Self::ImputeMissing { .. } => "impute_missing",
            Self::ConvertTypes { .. } => "convert_types",
            Self::RemoveDuplicates { .. } => "remove_duplicates",
            Self::StripTitles { .. } => "strip_titles",
            Self::ValidatePhone { .. } => "validate_phone",
            Self::ValidateEmail { .. } => "validate_email",
            Self::DetectOutliers => "detect_outliers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_serialization() {
        let recipe = Recipe::new("customers")
            .with_step(Step::StandardiseColumnNames)
            .with_step(Step::TrimWhitespace {
                columns: vec!["name".to_owned()],
            })
            .with_step(Step::ConvertTypes {
                columns: BTreeMap::from([("age".to_owned(), TargetType::Integer)]),
            });

        let json = serde_json::to_string_pretty(&recipe).expect("Failed to serialize");
        assert!(json.contains("\"version\": \"0.1\""));
        assert!(json.contains("\"op\": \"standardise_column_names\""));
        assert!(json.contains("\"age\": \"integer\""));

        let parsed = Recipe::from_json(&json).expect("Failed to parse");
        assert_eq!(parsed.name, "customers");
        assert_eq!(parsed.steps, recipe.steps);
    }

    #[test]
    fn test_recipe_defaults_and_aliases() {
        let json = r#"{
            "version": "0.1",
            "name": "defaults",
            "steps": [
                {"op": "normalise_case", "columns": ["city"]},
                {"op": "drop_missing"},
                {"op": "impute_missing"},
                {"op": "convert_types", "columns": {"id": "int", "zip": "str"}},
                {"op": "detect_outliers"}
            ]
        }"#;

        let recipe = Recipe::from_json(json).expect("Failed to parse");
        assert_eq!(
            recipe.steps,
            vec![
                Step::NormaliseCase {
                    columns: vec!["city".to_owned()],
                    case: TextCase::Lower,
                },
                Step::DropMissing { columns: vec![] },
                Step::ImputeMissing {
                    method: ImputeMethod::Mean
                },
                Step::ConvertTypes {
                    columns: BTreeMap::from([
                        ("id".to_owned(), TargetType::Integer),
                        ("zip".to_owned(), TargetType::Text),
                    ]),
                },
                Step::DetectOutliers,
            ]
        );
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let json = r#"{"version": "0.1", "name": "x", "steps": [{"op": "explode"}]}"#;
        assert!(Recipe::from_json(json).is_err());
    }
}

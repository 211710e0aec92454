//! Recipes: replayable cleaning pipelines.
//!
//! A [`Recipe`] is a versioned JSON list of steps. [`validate_recipe`] checks it
//! against a dataset's columns before anything runs, tracking the renames and
//! flag columns earlier steps introduce. [`run_recipe`] applies the steps in
//! order to a [`CleaningSession`](crate::analyser::CleaningSession).
//!
//! # Example
//!
//! ```no_run
//! use scour::analyser::CleaningSession;
//! use scour::analyser::logic::load_csv;
//! use scour::pipeline::{Recipe, run_recipe};
//! use std::path::Path;
//!
//! let df = load_csv(Path::new("customers.csv"))?;
//! let mut session = CleaningSession::new("customers.csv", df);
//!
//! let recipe = Recipe::from_file("customers.recipe.json")?;
//! let report = run_recipe(&recipe, &mut session)?;
//! println!("{}", report.summary());
//! # Ok::<(), scour::error::ScourError>(())
//! ```

pub mod executor;
pub mod recipe;
pub mod validation;

pub use executor::{RunReport, run_recipe, run_recipe_with};
pub use recipe::{RECIPE_VERSION, Recipe, Step};
pub use validation::{ValidationError, validate_recipe};

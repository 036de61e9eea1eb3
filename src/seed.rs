// ABOUTME: Recipe file loading and store seeding used by the seed-recipes binary
// ABOUTME: Reads a JSON array of recipes and upserts each row by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::database_plugins::RecipeStore;
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Counts reported after seeding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Rows inserted or overwritten
    pub upserted: usize,
    /// Rows flagged unmade by `--reset`
    pub reset: u64,
}

/// Parse a JSON array of recipes
///
/// Fields other than `name` are optional. Names must be non-empty and unique
/// within the file.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, a name is blank, or a name
/// repeats
pub fn parse_recipe_file(contents: &str) -> AppResult<Vec<Recipe>> {
    let recipes: Vec<Recipe> = serde_json::from_str(contents)?;

    let mut seen = HashSet::new();
    for recipe in &recipes {
        let name = recipe.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Recipe name cannot be empty"));
        }
        if !seen.insert(name.to_owned()) {
            return Err(AppError::invalid_input(format!(
                "Duplicate recipe name '{name}'"
            )));
        }
    }

    Ok(recipes
        .into_iter()
        .map(|mut recipe| {
            recipe.name = recipe.name.trim().to_owned();
            recipe
        })
        .collect())
}

/// Read and parse a recipe file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub async fn load_recipe_file(path: &Path) -> AppResult<Vec<Recipe>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display()))
    })?;
    parse_recipe_file(&contents)
}

/// Upsert every recipe, then optionally flag the whole table unmade
///
/// # Errors
///
/// Returns an error if any database write fails
pub async fn seed_store(
    store: &dyn RecipeStore,
    recipes: &[Recipe],
    reset: bool,
) -> AppResult<SeedReport> {
    for recipe in recipes {
        store.upsert_recipe(recipe).await?;
        debug!(recipe.name = %recipe.name, "recipe upserted");
    }

    let reset_rows = if reset { store.reset_all().await? } else { 0 };
    info!(
        seed.upserted = recipes.len(),
        seed.reset = reset_rows,
        "recipe table seeded"
    );

    Ok(SeedReport {
        upserted: recipes.len(),
        reset: reset_rows,
    })
}

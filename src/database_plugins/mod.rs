// ABOUTME: Database abstraction layer for the recipe rotation table
// ABOUTME: Plugin architecture with SQLite and MySQL backends behind one trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Recipe storage
//!
//! The rotation only needs a handful of operations on the `recipeList`
//! table: a filtered select, a bulk update by name list and a bulk update of
//! every row. Seeding and listing round out the trait.

use crate::errors::AppResult;
use crate::models::Recipe;
use async_trait::async_trait;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "mysql")]
pub mod mysql;

/// Core recipe storage trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the selection layer.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Create the recipe table if it does not exist
    async fn migrate(&self) -> AppResult<()>;

    /// Recipes flagged not made, ordered by name, skipping `excluding`
    async fn fetch_unmade(&self, excluding: &[String]) -> AppResult<Vec<Recipe>>;

    /// Flag every named recipe as made; returns affected rows
    async fn mark_made(&self, names: &[String]) -> AppResult<u64>;

    /// Flag every recipe as not made; returns affected rows
    async fn reset_all(&self) -> AppResult<u64>;

    /// Every recipe, ordered by name
    async fn list_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// Insert a recipe or overwrite the existing row with the same name
    async fn upsert_recipe(&self, recipe: &Recipe) -> AppResult<()>;
}

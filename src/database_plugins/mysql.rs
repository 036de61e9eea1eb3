// ABOUTME: MySQL implementation of the recipe store
// ABOUTME: Talks to the production recipeapp schema over TLS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use super::RecipeStore;
use crate::constants::{flags, schema};
use crate::errors::{AppError, AppResult};
use crate::models::{flag_from_column, flag_to_column, Recipe};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use std::time::Duration;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT Name, source, hasBeenMade, vegetarian FROM recipeList";

/// `MySQL` recipe store
#[derive(Clone)]
pub struct MySqlRecipeStore {
    pool: MySqlPool,
}

impl MySqlRecipeStore {
    /// Connect to a `MySQL` database
    ///
    /// A scheduled run issues a handful of sequential statements, so the pool
    /// stays small.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to MySQL: {e}")))?;

        Ok(Self { pool })
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn recipe_from_row(row: &MySqlRow) -> AppResult<Recipe> {
    let made: String = row.try_get(schema::COLUMN_HAS_BEEN_MADE)?;
    let vegetarian: String = row.try_get(schema::COLUMN_VEGETARIAN)?;
    let source: Option<String> = row.try_get(schema::COLUMN_SOURCE)?;
    Ok(Recipe {
        name: row.try_get(schema::COLUMN_NAME)?,
        source: source.unwrap_or_default(),
        has_been_made: flag_from_column(&made)?,
        vegetarian: flag_from_column(&vegetarian)?,
    })
}

#[async_trait]
impl RecipeStore for MySqlRecipeStore {
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipeList (
                Name VARCHAR(255) NOT NULL PRIMARY KEY,
                source VARCHAR(1024) NOT NULL DEFAULT '',
                hasBeenMade CHAR(1) NOT NULL DEFAULT 'N',
                vegetarian CHAR(1) NOT NULL DEFAULT 'N'
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipeList: {e}")))?;

        Ok(())
    }

    async fn fetch_unmade(&self, excluding: &[String]) -> AppResult<Vec<Recipe>> {
        let mut query = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        query.push(" WHERE hasBeenMade = ").push_bind(flags::NO);
        if !excluding.is_empty() {
            query.push(" AND Name NOT IN (");
            let mut separated = query.separated(", ");
            for name in excluding {
                separated.push_bind(name.clone());
            }
            separated.push_unseparated(")");
        }
        query.push(" ORDER BY Name");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch unmade recipes: {e}")))?;

        debug!(
            db.table = schema::RECIPE_TABLE,
            db.rows = rows.len(),
            db.excluded = excluding.len(),
            "fetched unmade recipes"
        );
        rows.iter().map(recipe_from_row).collect()
    }

    async fn mark_made(&self, names: &[String]) -> AppResult<u64> {
        if names.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<MySql>::new("UPDATE recipeList SET hasBeenMade = ");
        query.push_bind(flags::YES).push(" WHERE Name IN (");
        let mut separated = query.separated(", ");
        for name in names {
            separated.push_bind(name.clone());
        }
        separated.push_unseparated(")");

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to mark recipes made: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn reset_all(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE recipeList SET hasBeenMade = ?")
            .bind(flags::NO)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to reset recipes: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY Name"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(recipe_from_row).collect()
    }

    async fn upsert_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO recipeList (Name, source, hasBeenMade, vegetarian)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                source = VALUES(source),
                hasBeenMade = VALUES(hasBeenMade),
                vegetarian = VALUES(vegetarian)
            ",
        )
        .bind(&recipe.name)
        .bind(&recipe.source)
        .bind(flag_to_column(recipe.has_been_made))
        .bind(flag_to_column(recipe.vegetarian))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert recipe: {e}")))?;

        Ok(())
    }
}

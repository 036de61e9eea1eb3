// ABOUTME: SQLite implementation of the recipe store
// ABOUTME: Used for local runs and tests; mirrors the production recipeList schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use super::RecipeStore;
use crate::constants::{flags, schema};
use crate::errors::{AppError, AppResult};
use crate::models::{flag_from_column, flag_to_column, Recipe};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT Name, source, hasBeenMade, vegetarian FROM recipeList";

/// `SQLite` recipe store
#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

impl SqliteRecipeStore {
    /// Open (creating if needed) a `SQLite` database
    ///
    /// In-memory databases get a single long-lived connection; every new
    /// connection to `sqlite::memory:` would otherwise see an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true);

        let is_memory = database_url.contains(":memory:");
        if !is_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open SQLite database: {e}")))?;

        Ok(Self { pool })
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn recipe_from_row(row: &SqliteRow) -> AppResult<Recipe> {
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
impl RecipeStore for SqliteRecipeStore {
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipeList (
                Name TEXT PRIMARY KEY NOT NULL,
                source TEXT NOT NULL DEFAULT '',
                hasBeenMade TEXT NOT NULL DEFAULT 'N' CHECK (hasBeenMade IN ('Y', 'N')),
                vegetarian TEXT NOT NULL DEFAULT 'N' CHECK (vegetarian IN ('Y', 'N'))
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipeList: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_list_made ON recipeList(hasBeenMade)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to index recipeList: {e}")))?;

        Ok(())
    }

    async fn fetch_unmade(&self, excluding: &[String]) -> AppResult<Vec<Recipe>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
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

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE recipeList SET hasBeenMade = ");
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
        let result = sqlx::query("UPDATE recipeList SET hasBeenMade = ?1")
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
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(Name) DO UPDATE SET
                source = excluded.source,
                hasBeenMade = excluded.hasBeenMade,
                vegetarian = excluded.vegetarian
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

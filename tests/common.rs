// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory recipe stores, seeding helpers and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `recipe_rotation`

use anyhow::Result;
use recipe_rotation::{
    config::{DatabaseConfig, DatabaseUrl, EmailConfig, RotationConfig},
    database_plugins::{factory::Database, RecipeStore},
    models::Recipe,
    selection::SelectionPolicy,
};
use std::collections::HashSet;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup: migrated in-memory `SQLite`
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::connect("sqlite::memory:", true).await?;
    Ok(Arc::new(database))
}

/// In-memory database holding `recipes`
pub async fn create_seeded_database(recipes: &[Recipe]) -> Result<Arc<Database>> {
    let database = create_test_database().await?;
    for recipe in recipes {
        database.upsert_recipe(recipe).await?;
    }
    Ok(database)
}

/// Unmade, non-vegetarian recipes named `prefix1..=prefixN`
pub fn meat_recipes(prefix: &str, count: usize) -> Vec<Recipe> {
    (1..=count)
        .map(|i| Recipe::new(format!("{prefix}{i}"), format!("Cookbook p.{i}"), false))
        .collect()
}

/// Unmade vegetarian recipes named `prefix1..=prefixN`
pub fn vegetarian_recipes(prefix: &str, count: usize) -> Vec<Recipe> {
    (1..=count)
        .map(|i| {
            Recipe::new(
                format!("{prefix}{i}"),
                format!("https://example.com/{prefix}{i}"),
                true,
            )
        })
        .collect()
}

/// Same recipe flagged made
pub fn made(mut recipe: Recipe) -> Recipe {
    recipe.has_been_made = true;
    recipe
}

/// Names currently flagged made
pub async fn made_names(store: &dyn RecipeStore) -> Result<HashSet<String>> {
    Ok(store
        .list_recipes()
        .await?
        .into_iter()
        .filter(|r| r.has_been_made)
        .map(|r| r.name)
        .collect())
}

/// Configuration for handler tests: in-memory database, fixed seed and a
/// complete email section
pub fn test_rotation_config(policy: SelectionPolicy, seed: u64) -> RotationConfig {
    RotationConfig {
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            auto_migrate: true,
        },
        email: EmailConfig {
            api_key: Some("re_test".to_owned()),
            recipients: vec!["cook@example.com".to_owned()],
            ..EmailConfig::default()
        },
        selection: policy,
        rng_seed: Some(seed),
    }
}

// ABOUTME: Integration tests for seeding the recipe table from a JSON file
// ABOUTME: Uses temporary files and an in-memory SQLite store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_database, made_names};
use recipe_rotation::database_plugins::factory::Database;
use recipe_rotation::database_plugins::RecipeStore;
use recipe_rotation::seed::{load_recipe_file, seed_store, SeedReport};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const RECIPES_JSON: &str = r#"[
    {"name": "Chana Masala", "source": "https://example.com/chana", "vegetarian": true},
    {"name": "Shepherd's Pie", "source": "Grandma", "has_been_made": true},
    {"name": "Tacos"}
]"#;

fn recipe_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_seed_from_file() {
    let file = recipe_file(RECIPES_JSON);
    let recipes = load_recipe_file(file.path()).await.unwrap();
    let database = create_test_database().await.unwrap();

    let report = seed_store(database.as_ref(), &recipes, false).await.unwrap();

    assert_eq!(report, SeedReport { upserted: 3, reset: 0 });
    let stored = database.list_recipes().await.unwrap();
    let names: Vec<&str> = stored.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Chana Masala", "Shepherd's Pie", "Tacos"]);
    assert!(stored[0].vegetarian);
    assert_eq!(
        made_names(database.as_ref()).await.unwrap().into_iter().collect::<Vec<_>>(),
        ["Shepherd's Pie"]
    );
}

#[tokio::test]
async fn test_reseed_overwrites_and_resets() {
    let file = recipe_file(RECIPES_JSON);
    let recipes = load_recipe_file(file.path()).await.unwrap();
    let database = create_test_database().await.unwrap();
    seed_store(database.as_ref(), &recipes, false).await.unwrap();

    let report = seed_store(database.as_ref(), &recipes, true).await.unwrap();

    assert_eq!(report.reset, 3);
    assert_eq!(database.list_recipes().await.unwrap().len(), 3);
    assert!(made_names(database.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_or_invalid_file() {
    let dir = TempDir::new().unwrap();
    assert!(load_recipe_file(&dir.path().join("absent.json")).await.is_err());

    let file = recipe_file("[{\"source\": \"no name\"}]");
    assert!(load_recipe_file(file.path()).await.is_err());
}

#[tokio::test]
async fn test_file_backed_database_is_created() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("recipes.db");
    let url = format!("sqlite:{}", db_path.display());

    let database = Database::connect(&url, true).await.unwrap();
    let file = recipe_file(RECIPES_JSON);
    let recipes = load_recipe_file(file.path()).await.unwrap();
    seed_store(&database, &recipes, false).await.unwrap();

    assert!(db_path.exists());
    let reopened = Database::connect(&url, false).await.unwrap();
    assert_eq!(reopened.list_recipes().await.unwrap().len(), 3);
}

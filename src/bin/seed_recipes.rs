// ABOUTME: Recipe table seeding utility for the rotation job
// ABOUTME: Upserts recipes from a JSON file into SQLite or MySQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Recipe seeder.
//!
//! The file is a JSON array of objects with `name` and optional `source`,
//! `vegetarian` and `has_been_made` fields.
//!
//! Usage:
//! ```bash
//! # Seed recipes (uses DATABASE_URL / HOST etc. from environment)
//! cargo run --bin seed-recipes -- --file recipes.json
//!
//! # Override database URL
//! cargo run --bin seed-recipes -- --file recipes.json --database-url sqlite:./data/recipes.db
//!
//! # Start a fresh rotation: flag every recipe unmade afterwards
//! cargo run --bin seed-recipes -- --file recipes.json --reset
//! ```

use anyhow::Result;
use clap::Parser;
use recipe_rotation::config::{DatabaseConfig, DatabaseUrl};
use recipe_rotation::database_plugins::factory::Database;
use recipe_rotation::seed::{load_recipe_file, seed_store};
use std::env;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-recipes",
    about = "Recipe Rotation Seeder",
    long_about = "Insert or update recipes in the recipeList table from a JSON file"
)]
struct SeedArgs {
    /// JSON file with the recipes to upsert
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Flag every recipe as not made after seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Recipe Rotation Seeder ===");

    let database_url = match &args.database_url {
        Some(url) => DatabaseUrl::parse_url(url)?,
        None => DatabaseConfig::from_lookup(&|key: &str| env::var(key).ok())?.url,
    };
    info!("Connecting to database: {}", database_url);
    let database = Database::connect(&database_url.to_connection_string(), true).await?;

    let recipes = load_recipe_file(&args.file).await?;
    info!("Seeding {} recipes from {}", recipes.len(), args.file.display());
    let report = seed_store(&database, &recipes, args.reset).await?;

    info!("=== Seeding Complete ===");
    info!("Upserted {} recipes", report.upserted);
    if args.reset {
        info!("Reset {} recipes to not made", report.reset);
    }

    Ok(())
}

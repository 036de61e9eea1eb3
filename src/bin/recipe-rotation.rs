// ABOUTME: Command-line runner for one recipe rotation invocation
// ABOUTME: Loads config from the environment, runs the handler and prints the JSON response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Recipe rotation runner.
//!
//! Usage:
//! ```bash
//! # Run one rotation (uses DATABASE_URL / HOST etc. from environment)
//! cargo run --bin recipe-rotation
//!
//! # Select and persist without sending email
//! cargo run --bin recipe-rotation -- --dry-run
//!
//! # Reproducible selection against a local database
//! cargo run --bin recipe-rotation -- --database-url sqlite:./data/recipes.db --seed 7
//!
//! # Show the whole table instead of rotating
//! cargo run --bin recipe-rotation -- --list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use recipe_rotation::config::{DatabaseUrl, RotationConfig};
use recipe_rotation::database_plugins::RecipeStore;
use recipe_rotation::handler::{lambda_handler, InvocationContext, RotationResources};
use recipe_rotation::logging;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "recipe-rotation",
    about = "Weekly recipe rotation",
    long_about = "Pick this week's recipes, flag them made and email the list"
)]
struct RunArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Fixed RNG seed (overrides ROTATION_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Select and persist but do not send email
    #[arg(long)]
    dry_run: bool,

    /// Print every recipe instead of running a rotation
    #[arg(long)]
    list: bool,

    /// Raw JSON event passed to the handler
    #[arg(long, default_value = "{}")]
    event: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = RunArgs::parse();
    logging::init_from_env()?;

    let mut config = RotationConfig::from_env().context("invalid configuration")?;
    if let Some(url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    info!("Configuration: {}", config.summary());

    let send_email = !(args.dry_run || args.list);
    let resources = RotationResources::from_config(config, send_email).await?;

    if args.list {
        let recipes = resources.store.list_recipes().await?;
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    let event: serde_json::Value =
        serde_json::from_str(&args.event).context("--event is not valid JSON")?;
    let context = InvocationContext::new("recipe-rotation").with_dry_run(args.dry_run);
    let response = lambda_handler(&event, &context, &resources).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

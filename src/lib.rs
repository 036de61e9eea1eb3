// ABOUTME: Main library entry point for the weekly recipe rotation job
// ABOUTME: Selects recipes from the recipe table, flags them made and emails the list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Recipe Rotation
//!
//! A scheduled job that picks a small rotating batch of recipes each run. It
//! favours recipes not made yet, guarantees one vegetarian dish when one is
//! available, and wraps around by resetting every recipe once the unmade pool
//! runs low. The batch is emailed as an HTML list.
//!
//! ## Architecture
//!
//! - **Selection**: pure sampling passes plus the store-backed orchestrator
//! - **Database plugins**: `SQLite` and `MySQL` behind the [`database_plugins::RecipeStore`] trait
//! - **External**: HTTP email client and a mock sender
//! - **Formatters**: HTML rendering of the batch
//! - **Handler**: one scheduled invocation end to end
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_rotation::config::RotationConfig;
//! use recipe_rotation::errors::AppResult;
//! use recipe_rotation::handler::{lambda_handler, InvocationContext, RotationResources};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = RotationConfig::from_env()?;
//!     let resources = RotationResources::from_config(config, true).await?;
//!     let context = InvocationContext::new("recipe-rotation");
//!     let response = lambda_handler(&serde_json::json!({}), &context, &resources).await?;
//!     println!("{:?}", response.body.message);
//!     Ok(())
//! }
//! ```

/// Error types shared across the workspace
pub use recipe_core::errors;

/// Table names, flag values, environment keys and defaults
pub use recipe_core::constants;

/// Recipe record model
pub use recipe_core::models;

/// Environment configuration
pub mod config;

/// Recipe storage backends
pub mod database_plugins;

/// External API clients
pub mod external;

/// Email body rendering
pub mod formatters;

/// Scheduled invocation entry point
pub mod handler;

/// Structured logging setup
pub mod logging;

/// Recipe file loading for seeding
pub mod seed;

/// Rotation selection algorithm
pub mod selection;

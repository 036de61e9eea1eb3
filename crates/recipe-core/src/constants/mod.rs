// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Table schema names, flag encodings, environment keys and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Recipe table schema as it exists in the production database
pub mod schema {
    /// Table holding the recipe rotation
    pub const RECIPE_TABLE: &str = "recipeList";
    /// Unique recipe name, used as the update key
    pub const COLUMN_NAME: &str = "Name";
    /// Consumption flag column
    pub const COLUMN_HAS_BEEN_MADE: &str = "hasBeenMade";
    /// Category flag column
    pub const COLUMN_VEGETARIAN: &str = "vegetarian";
    /// Attribution column
    pub const COLUMN_SOURCE: &str = "source";
}

/// Wire encoding of the boolean-like flag columns
pub mod flags {
    /// Flag set
    pub const YES: &str = "Y";
    /// Flag cleared
    pub const NO: &str = "N";
}

/// Environment variable names
pub mod env_keys {
    /// Full database URL, takes precedence over the split credentials
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Database host
    pub const DB_HOST: &str = "HOST";
    /// Database user
    pub const DB_USER: &str = "DB_USER";
    /// Database password
    pub const DB_PASS: &str = "DB_PASS";
    /// Database (schema) name
    pub const DB_NAME: &str = "DB_NAME";
    /// Create the recipe table on startup if it is missing
    pub const AUTO_MIGRATE: &str = "AUTO_MIGRATE";
    /// Email provider API key
    pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
    /// Email provider base URL
    pub const EMAIL_API_URL: &str = "EMAIL_API_URL";
    /// Sender address
    pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
    /// Comma-separated recipient addresses
    pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
    /// Email subject line
    pub const EMAIL_SUBJECT: &str = "EMAIL_SUBJECT";
    /// Request timeout for the email provider
    pub const EMAIL_TIMEOUT_SECS: &str = "EMAIL_TIMEOUT_SECS";
    /// Number of non-quota recipes per batch
    pub const BATCH_TARGET_SIZE: &str = "BATCH_TARGET_SIZE";
    /// Pool size below which the rotation wraps around
    pub const BATCH_MINIMUM_SIZE: &str = "BATCH_MINIMUM_SIZE";
    /// Reserve a slot for one vegetarian recipe
    pub const VEGETARIAN_QUOTA: &str = "VEGETARIAN_QUOTA";
    /// Let the top-up pass re-pick recipes chosen earlier in the run
    pub const ALLOW_REPEAT_AFTER_RESET: &str = "ALLOW_REPEAT_AFTER_RESET";
    /// Fixed RNG seed for reproducible runs
    pub const ROTATION_SEED: &str = "ROTATION_SEED";
}

/// Default configuration values
pub mod defaults {
    /// Schema name used by the production deployment
    pub const DB_NAME: &str = "recipeapp";
    /// Local fallback database
    pub const DATABASE_URL: &str = "sqlite:./data/recipes.db";
    /// Resend-compatible email API
    pub const EMAIL_API_URL: &str = "https://api.resend.com";
    /// Sender used when none is configured
    pub const SENDER_EMAIL: &str = "Recipe Rotation <recipes@resend.dev>";
    /// Subject line used when none is configured
    pub const EMAIL_SUBJECT: &str = "This week's recipes";
    /// Email provider request timeout
    pub const EMAIL_TIMEOUT_SECS: u64 = 15;
    /// Non-quota recipes per batch
    pub const BATCH_TARGET_SIZE: usize = 2;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// This job
    pub const RECIPE_ROTATION: &str = "recipe-rotation";
    /// Email provider label used in error messages
    pub const EMAIL_PROVIDER: &str = "Email API";
}

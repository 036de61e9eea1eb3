// ABOUTME: Environment configuration management for the rotation job
// ABOUTME: Parses environment variables into typed database, email and selection settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Environment-based configuration

use super::database::DatabaseConfig;
use super::email::EmailConfig;
use crate::constants::{defaults, env_keys};
use crate::errors::{AppError, AppResult};
use crate::selection::SelectionPolicy;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Variable lookup used by every `from_lookup` constructor
///
/// Production passes a wrapper around [`env::var`]; tests pass a map.
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Complete configuration for one rotation run
#[derive(Debug, Clone)]
pub struct RotationConfig {
    /// Database connection
    pub database: DatabaseConfig,
    /// Email delivery
    pub email: EmailConfig,
    /// Batch sizing and quota rules
    pub selection: SelectionPolicy,
    /// Fixed RNG seed; entropy is used when absent
    pub rng_seed: Option<u64>,
}

impl RotationConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is malformed
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is malformed or the selection policy
    /// is unusable
    pub fn from_lookup(lookup: &EnvLookup<'_>) -> AppResult<Self> {
        let database = DatabaseConfig::from_lookup(lookup)?;
        let email = EmailConfig::from_lookup(lookup)?;
        let selection = selection_from_lookup(lookup)?;
        let rng_seed = parse_optional_number(lookup, env_keys::ROTATION_SEED)?;

        Ok(Self {
            database,
            email,
            selection,
            rng_seed,
        })
    }

    /// One-line summary for startup logs, secrets masked
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} auto_migrate={} email_api={} recipients={} target={} max_batch={} minimum={} vegetarian_quota={} seeded={}",
            self.database.url,
            self.database.auto_migrate,
            self.email.api_url,
            self.email.recipients.len(),
            self.selection.target_size,
            self.selection.max_batch_size(),
            self.selection.minimum_size,
            self.selection.category_quota,
            self.rng_seed.is_some(),
        )
    }
}

fn selection_from_lookup(lookup: &EnvLookup<'_>) -> AppResult<SelectionPolicy> {
    let target_size = parse_number(
        lookup,
        env_keys::BATCH_TARGET_SIZE,
        defaults::BATCH_TARGET_SIZE,
    )?;
    let category_quota = match lookup(env_keys::VEGETARIAN_QUOTA) {
        Some(value) => parse_bool(env_keys::VEGETARIAN_QUOTA, &value)?,
        None => true,
    };
    let allow_repeat = match lookup(env_keys::ALLOW_REPEAT_AFTER_RESET) {
        Some(value) => parse_bool(env_keys::ALLOW_REPEAT_AFTER_RESET, &value)?,
        None => false,
    };

    let mut policy =
        SelectionPolicy::new(target_size, category_quota).with_repeats_after_reset(allow_repeat);
    if let Some(minimum) = parse_optional_number(lookup, env_keys::BATCH_MINIMUM_SIZE)? {
        policy = policy.with_minimum_size(minimum);
    }
    policy.validate()?;
    Ok(policy)
}

/// Parse a boolean flag accepting `true/false`, `1/0`, `yes/no`, `y/n`
///
/// # Errors
///
/// Returns an error if the value is none of the accepted spellings
pub fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        other => Err(AppError::config_invalid(
            key,
            format!("'{other}' is not a boolean"),
        )),
    }
}

/// Parse a numeric variable, falling back to `default` when unset
///
/// # Errors
///
/// Returns an error if the variable is set but does not parse
pub fn parse_number<T>(lookup: &EnvLookup<'_>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(parse_optional_number(lookup, key)?.unwrap_or(default))
}

/// Parse an optional numeric variable
///
/// # Errors
///
/// Returns an error if the variable is set but does not parse
pub fn parse_optional_number<T>(lookup: &EnvLookup<'_>, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::config_invalid(key, format!("'{raw}': {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> AppResult<RotationConfig> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        RotationConfig::from_lookup(&|key: &str| map.get(key).map(|v| (*v).to_owned()))
    }

    #[test]
    fn test_defaults() {
        let Ok(config) = load(&[]) else {
            unreachable!("empty environment must load");
        };
        assert_eq!(config.selection.target_size, 2);
        assert_eq!(config.selection.minimum_size, 3);
        assert!(config.selection.category_quota);
        assert!(config.selection.exclude_chosen_on_top_up);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_minimum_defaults_to_target_without_quota() {
        let Ok(config) = load(&[("BATCH_TARGET_SIZE", "4"), ("VEGETARIAN_QUOTA", "false")])
        else {
            unreachable!("valid environment must load");
        };
        assert_eq!(config.selection.target_size, 4);
        assert_eq!(config.selection.minimum_size, 4);
        assert!(!config.selection.category_quota);
    }

    #[test]
    fn test_explicit_minimum_and_seed() {
        let Ok(config) = load(&[
            ("BATCH_MINIMUM_SIZE", "5"),
            ("ROTATION_SEED", "42"),
            ("ALLOW_REPEAT_AFTER_RESET", "yes"),
        ]) else {
            unreachable!("valid environment must load");
        };
        assert_eq!(config.selection.minimum_size, 5);
        assert_eq!(config.rng_seed, Some(42));
        assert!(!config.selection.exclude_chosen_on_top_up);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(load(&[("BATCH_TARGET_SIZE", "two")]).is_err());
        assert!(load(&[("BATCH_TARGET_SIZE", "0")]).is_err());
        assert!(load(&[("VEGETARIAN_QUOTA", "maybe")]).is_err());
        assert!(load(&[("ROTATION_SEED", "-1")]).is_err());
    }

    #[test]
    fn test_rejects_target_size_at_usize_max() {
        let max = usize::MAX.to_string();
        let Err(err) = load(&[("BATCH_TARGET_SIZE", max.as_str())]) else {
            unreachable!("target size with no room for the quota slot must fail");
        };
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_summary_masks_password() {
        let Ok(config) = load(&[
            ("HOST", "db.example.com"),
            ("DB_USER", "chef"),
            ("DB_PASS", "hunter2"),
        ]) else {
            unreachable!("valid environment must load");
        };
        let summary = config.summary();
        assert!(summary.contains("chef:****@db.example.com"));
        assert!(!summary.contains("hunter2"));
    }
}

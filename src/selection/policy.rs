// ABOUTME: Batch sizing rules for the recipe rotation
// ABOUTME: Target size, wraparound threshold, vegetarian quota and top-up exclusion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::constants::{defaults, env_keys};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// How many recipes a run picks and when the rotation wraps around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Randomly drawn (non-quota) recipes per regular pass
    pub target_size: usize,
    /// Pool size below which every recipe is reset and the batch topped up
    pub minimum_size: usize,
    /// Reserve one extra slot for a vegetarian recipe
    pub category_quota: bool,
    /// Top-up pass skips names the first pass already picked
    pub exclude_chosen_on_top_up: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new(defaults::BATCH_TARGET_SIZE, true)
    }
}

impl SelectionPolicy {
    /// Policy whose minimum is the full batch: `target_size` plus the quota slot
    #[must_use]
    pub const fn new(target_size: usize, category_quota: bool) -> Self {
        Self {
            target_size,
            minimum_size: if category_quota {
                target_size.saturating_add(1)
            } else {
                target_size
            },
            category_quota,
            exclude_chosen_on_top_up: true,
        }
    }

    /// Override the wraparound threshold
    #[must_use]
    pub const fn with_minimum_size(mut self, minimum_size: usize) -> Self {
        self.minimum_size = minimum_size;
        self
    }

    /// Allow or forbid re-picking first-pass recipes after a reset
    #[must_use]
    pub const fn with_repeats_after_reset(mut self, allow: bool) -> Self {
        self.exclude_chosen_on_top_up = !allow;
        self
    }

    /// Largest batch a regular pass can produce
    #[must_use]
    pub const fn max_batch_size(&self) -> usize {
        if self.category_quota {
            self.target_size.saturating_add(1)
        } else {
            self.target_size
        }
    }

    /// Reject policies that can never select anything
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero or the batch size overflows
    pub fn validate(&self) -> AppResult<()> {
        if self.target_size == 0 {
            return Err(AppError::config_invalid(
                env_keys::BATCH_TARGET_SIZE,
                "must be at least 1",
            ));
        }
        if self.category_quota && self.target_size.checked_add(1).is_none() {
            return Err(AppError::config_invalid(
                env_keys::BATCH_TARGET_SIZE,
                "too large to reserve the vegetarian slot",
            ));
        }
        if self.minimum_size == 0 {
            return Err(AppError::config_invalid(
                env_keys::BATCH_MINIMUM_SIZE,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_tracks_quota() {
        assert_eq!(SelectionPolicy::new(2, true).minimum_size, 3);
        assert_eq!(SelectionPolicy::new(2, false).minimum_size, 2);
        assert_eq!(SelectionPolicy::default().max_batch_size(), 3);
    }

    #[test]
    fn test_validate() {
        assert!(SelectionPolicy::new(0, true).validate().is_err());
        assert!(SelectionPolicy::new(2, false)
            .with_minimum_size(0)
            .validate()
            .is_err());
        assert!(SelectionPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_huge_target_does_not_overflow() {
        let policy = SelectionPolicy::new(usize::MAX, true);
        assert_eq!(policy.minimum_size, usize::MAX);
        assert_eq!(policy.max_batch_size(), usize::MAX);
        assert!(policy.validate().is_err());
        assert!(SelectionPolicy::new(usize::MAX, false).validate().is_ok());
    }
}

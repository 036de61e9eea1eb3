// ABOUTME: Recipe rotation selection with wraparound and vegetarian quota
// ABOUTME: Pure sampling passes plus the store-backed orchestration of a full run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! # Rotation Selection
//!
//! A run picks `target_size` not-yet-made recipes at random, plus one
//! vegetarian recipe when the quota is on. When fewer than `minimum_size`
//! unmade recipes remain, every recipe is flagged unmade again and the batch
//! is topped up from the refreshed pool. The chosen recipes are then flagged
//! made.
//!
//! The sampling passes are pure functions of a slice and an injected random
//! source, so they can be tested with a seeded RNG. [`RotationSelector`] owns
//! the database side of a run.

mod policy;

pub use policy::SelectionPolicy;

use crate::database_plugins::RecipeStore;
use crate::errors::AppResult;
use crate::models::Recipe;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which kind of sampling pass is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Normal pass over the unmade pool; the quota slot applies
    Regular,
    /// Shortfall pass after a reset; no quota slot
    TopUp,
}

/// How the final batch came together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum RotationPath {
    /// Enough unmade recipes; no reset
    Regular,
    /// Pool was empty: reset, then a full regular pass
    RedoAfterReset,
    /// Pool was short: reset, then a top-up pass for the shortfall
    TopUpAfterReset {
        /// Recipes requested from the top-up pass
        shortfall: usize,
    },
}

impl RotationPath {
    /// Whether the run reset every recipe to unmade
    #[must_use]
    pub const fn did_reset(&self) -> bool {
        !matches!(self, Self::Regular)
    }
}

/// Result of one rotation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionBatch {
    /// Chosen recipes in batch order
    pub recipes: Vec<Recipe>,
    /// Size of the unmade pool at the start of the run
    pub pool_size: usize,
    /// Reset / top-up path taken
    pub path: RotationPath,
    /// Rows flagged made by the final update
    pub marked_rows: u64,
}

impl SelectionBatch {
    /// Names in batch order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        names_of(&self.recipes)
    }

    /// Number of recipes in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn names_of(recipes: &[Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.name.clone()).collect()
}

/// Index of the quota candidate: the first vegetarian recipe in pool order
#[must_use]
pub fn quota_candidate(pool: &[Recipe]) -> Option<usize> {
    pool.iter().position(|r| r.vegetarian)
}

/// Run one sampling pass over `pool`
///
/// On a [`PassKind::Regular`] pass with `category_quota` set, the quota
/// candidate is held back from the draw and appended after `count` uniformly
/// shuffled picks, so the result holds at most `count + 1` recipes. A
/// [`PassKind::TopUp`] pass draws `count` recipes from the whole pool.
pub fn select_pass<R: Rng + ?Sized>(
    pool: &[Recipe],
    count: usize,
    kind: PassKind,
    category_quota: bool,
    rng: &mut R,
) -> Vec<Recipe> {
    let candidate = match kind {
        PassKind::Regular if category_quota => quota_candidate(pool),
        _ => None,
    };

    let mut drawable: Vec<&Recipe> = pool
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != candidate)
        .map(|(_, recipe)| recipe)
        .collect();
    drawable.shuffle(rng);

    let mut picked: Vec<Recipe> = drawable.into_iter().take(count).cloned().collect();
    if let Some(quota) = candidate.and_then(|index| pool.get(index)) {
        picked.push(quota.clone());
    }
    picked
}

/// Runs a full rotation against a recipe store
pub struct RotationSelector<'a> {
    store: &'a dyn RecipeStore,
    policy: SelectionPolicy,
}

impl<'a> RotationSelector<'a> {
    /// Create a selector over `store`
    #[must_use]
    pub fn new(store: &'a dyn RecipeStore, policy: SelectionPolicy) -> Self {
        Self { store, policy }
    }

    /// Select, persist and return this run's batch
    ///
    /// # Errors
    ///
    /// Returns an error if any database read or update fails; nothing is retried
    pub async fn select_batch<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> AppResult<SelectionBatch> {
        let policy = self.policy;
        let pool = self.store.fetch_unmade(&[]).await?;
        let pool_size = pool.len();

        let first = select_pass(
            &pool,
            policy.target_size,
            PassKind::Regular,
            policy.category_quota,
            rng,
        );
        debug!(
            pool.size = pool_size,
            pass.picked = first.len(),
            "first selection pass complete"
        );

        let (mut recipes, path) = if pool_size >= policy.minimum_size {
            (first, RotationPath::Regular)
        } else {
            let reset_rows = self.store.reset_all().await?;
            warn!(
                pool.size = pool_size,
                pool.minimum = policy.minimum_size,
                reset.rows = reset_rows,
                "unmade pool below minimum, rotation wrapped around"
            );

            if first.is_empty() {
                let refreshed = self.store.fetch_unmade(&[]).await?;
                let redo = select_pass(
                    &refreshed,
                    policy.target_size,
                    PassKind::Regular,
                    policy.category_quota,
                    rng,
                );
                (redo, RotationPath::RedoAfterReset)
            } else {
                let shortfall = policy.minimum_size.saturating_sub(first.len());
                let excluding = if policy.exclude_chosen_on_top_up {
                    names_of(&first)
                } else {
                    Vec::new()
                };
                let refreshed = self.store.fetch_unmade(&excluding).await?;
                let top_up = select_pass(&refreshed, shortfall, PassKind::TopUp, false, rng);
                if top_up.len() < shortfall {
                    warn!(
                        shortfall,
                        top_up.picked = top_up.len(),
                        "not enough recipes to fill the batch"
                    );
                }
                let mut combined = first;
                combined.extend(top_up);
                (combined, RotationPath::TopUpAfterReset { shortfall })
            }
        };

        let names = names_of(&recipes);
        let marked_rows = self.store.mark_made(&names).await?;
        for recipe in &mut recipes {
            recipe.has_been_made = true;
        }

        info!(
            batch.size = recipes.len(),
            batch.path = ?path,
            batch.names = ?names,
            db.marked_rows = marked_rows,
            "recipe batch selected"
        );

        Ok(SelectionBatch {
            recipes,
            pool_size,
            path,
            marked_rows,
        })
    }
}

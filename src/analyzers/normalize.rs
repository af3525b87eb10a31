//! Centres raw averages on a target score.

use crate::analyzers::types::{Normalization, RawScores};
use crate::analyzers::utility::{mean_of_ints, round_clamped};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_TARGET: u8 = 5;
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 9;

/// Shifts every raw average by `target - group_mean`, rounds half away from
/// zero and clamps into `[MIN_SCORE, MAX_SCORE]`.
///
/// The group mean is taken over the whole rating pool, not over the
/// per-student averages. An empty pool yields no scores, a group mean of 0
/// and no adjustment.
pub fn normalize_scores(raw: &RawScores, target: u8) -> Normalization {
    if raw.pool.is_empty() {
        return Normalization::default();
    }

    let group_mean = mean_of_ints(&raw.pool);
    let adjustment = f64::from(target) - group_mean;

    let scores: HashMap<String, u8> = raw
        .averages
        .iter()
        .map(|(name, average)| {
            let score = round_clamped(average + adjustment, MIN_SCORE, MAX_SCORE);
            (name.clone(), score)
        })
        .collect();

    debug!(group_mean, adjustment, students = scores.len(), "Scores normalized");

    Normalization {
        scores,
        group_mean,
        adjustment,
    }
}

//! Shared top-k ranking for every recommendation strategy.
//!
//! User-based CF, item-based CF, and the random-walk sampler all funnel
//! their candidate scores through [`rank_by_score`], so one
//! ranking/tie-break contract holds system-wide: descending score, ties
//! broken by ascending movie id.
//!
//! # Examples
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//! use sugerir::rank::rank_by_score;
//!
//! let scores = HashMap::from([(10, 0.5), (20, 0.9), (30, 0.9)]);
//! let ranked = rank_by_score(&scores, 2, &HashSet::new());
//!
//! // 20 and 30 tie on score; the lower movie id wins.
//! assert_eq!(ranked, vec![(20, 0.9), (30, 0.9)]);
//! ```

use std::collections::{HashMap, HashSet};

/// Ranks candidate movies, dropping excluded ids, and returns the top `k`.
///
/// Ordering is descending by score with ascending movie id as the
/// tie-break, which makes equal-score output deterministic. Non-finite
/// scores are dropped rather than ranked.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use sugerir::rank::rank_by_score;
///
/// let scores = HashMap::from([(1, 3.0), (2, 5.0)]);
/// let exclude = HashSet::from([2]);
/// assert_eq!(rank_by_score(&scores, 10, &exclude), vec![(1, 3.0)]);
/// ```
#[must_use]
pub fn rank_by_score(
    scores: &HashMap<u32, f32>,
    k: usize,
    exclude: &HashSet<u32>,
) -> Vec<(u32, f32)> {
    let mut ranked: Vec<(u32, f32)> = scores
        .iter()
        .filter(|(id, score)| !exclude.contains(id) && score.is_finite())
        .map(|(&id, &score)| (id, score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// Ranks integer visit counts by delegating to [`rank_by_score`].
///
/// Keeps the walk strategy on the same tie-break contract as the CF
/// strategies.
#[must_use]
pub fn rank_counts(
    counts: &HashMap<u32, u32>,
    k: usize,
    exclude: &HashSet<u32>,
) -> Vec<(u32, f32)> {
    let scores: HashMap<u32, f32> = counts.iter().map(|(&id, &c)| (id, c as f32)).collect();
    rank_by_score(&scores, k, exclude)
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod tests;

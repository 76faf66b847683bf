//! Neighborhood-based recommendation strategies.
//!
//! Two collaborative-filtering paths over a [`RatingMatrix`] plus the
//! popularity fallback:
//!
//! - [`recommend_for_user`]: weighted-average scoring over the most
//!   similar users (user-based CF)
//! - [`similar_items`]: movie–movie similarity ranking (item-based CF)
//! - [`popularity`]: rating-count ranking, the documented recovery path
//!   when a user's neighborhood is empty
//!
//! All three produce the same ranked-list shape through
//! [`crate::rank::rank_by_score`].
//!
//! # Examples
//!
//! ```
//! use sugerir::prelude::*;
//!
//! let ratings = vec![
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(1, 20, 4, 0).unwrap(),
//!     Rating::new(2, 10, 5, 0).unwrap(),
//! ];
//! let matrix = RatingMatrix::from_ratings(&ratings).unwrap();
//! let sim = SimilarityMatrix::cosine(&matrix, Axis::Users);
//!
//! // User 2 looks like user 1, who also liked movie 20.
//! let recs = recommend_for_user(&matrix, &sim, 2, 1, &UserRecConfig::default()).unwrap();
//! assert_eq!(recs[0].0, 20);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SugerirError};
use crate::rank::rank_by_score;
use crate::ratings::RatingMatrix;
use crate::similarity::{Axis, SimilarityMatrix};

/// Configuration for [`recommend_for_user`].
///
/// Defaults: unbounded neighborhood (every user with positive similarity)
/// and already-rated movies excluded from the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecConfig {
    /// Keep only the `n` most similar users. `None` keeps every user with
    /// similarity > 0.
    pub neighborhood: Option<usize>,
    /// Drop movies the query user has already rated.
    pub exclude_seen: bool,
}

impl Default for UserRecConfig {
    fn default() -> Self {
        Self {
            neighborhood: None,
            exclude_seen: true,
        }
    }
}

impl UserRecConfig {
    fn validate(&self) -> Result<()> {
        if self.neighborhood == Some(0) {
            return Err(SugerirError::invalid_hyperparameter(
                "neighborhood",
                0,
                "positive neighbor count or None",
            ));
        }
        Ok(())
    }
}

/// Ranks unseen movies for `user_id` by similarity-weighted neighbor
/// ratings.
///
/// Every other user with positive similarity forms the neighborhood,
/// ranked similarity descending with ascending user id on ties and cut to
/// `config.neighborhood` when set. Each candidate movie scores
///
/// ```text
/// score(m) = Σ sim(user, u) · rating(u, m)  /  Σ |sim(user, u)|
/// ```
///
/// with both sums over neighborhood users who rated `m`; movies nobody in
/// the neighborhood rated are omitted. With `exclude_seen` (the default)
/// the result never contains a movie `user_id` already rated.
///
/// # Errors
///
/// - [`SugerirError::UnknownEntity`] if `user_id` was never observed, or
///   [`SugerirError::InvalidHyperparameter`] if `user_sim` was computed
///   over the item axis or the config is out of range.
/// - [`SugerirError::EmptyNeighborhood`] when no other user has positive
///   similarity. Recoverable: fall back to [`popularity`].
pub fn recommend_for_user(
    matrix: &RatingMatrix,
    user_sim: &SimilarityMatrix,
    user_id: u32,
    k: usize,
    config: &UserRecConfig,
) -> Result<Vec<(u32, f32)>> {
    config.validate()?;
    if user_sim.axis() != Axis::Users {
        return Err(SugerirError::invalid_hyperparameter(
            "user_sim",
            "item-axis similarity matrix",
            "a similarity matrix computed over Axis::Users",
        ));
    }
    let similarities = user_sim.row(user_id)?;
    matrix.row(user_id)?;

    let mut neighbors: Vec<(u32, f32)> = user_sim
        .ids()
        .iter()
        .zip(similarities)
        .filter(|&(&id, &sim)| id != user_id && sim > 0.0)
        .map(|(&id, &sim)| (id, sim))
        .collect();
    if neighbors.is_empty() {
        return Err(SugerirError::EmptyNeighborhood { user_id });
    }
    neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    if let Some(n) = config.neighborhood {
        neighbors.truncate(n);
    }

    let mut numerator: HashMap<u32, f32> = HashMap::new();
    let mut denominator: HashMap<u32, f32> = HashMap::new();
    for &(neighbor, sim) in &neighbors {
        for &(movie, rating) in matrix.row(neighbor)? {
            *numerator.entry(movie).or_insert(0.0) += sim * rating;
            *denominator.entry(movie).or_insert(0.0) += sim.abs();
        }
    }
    let scores: HashMap<u32, f32> = numerator
        .into_iter()
        .filter_map(|(movie, num)| {
            let den = denominator[&movie];
            (den > 0.0).then(|| (movie, num / den))
        })
        .collect();

    let exclude: HashSet<u32> = if config.exclude_seen {
        matrix.row(user_id)?.iter().map(|&(m, _)| m).collect()
    } else {
        HashSet::new()
    };
    Ok(rank_by_score(&scores, k, &exclude))
}

/// Ranks the movies most similar to `movie_id`, excluding the query movie
/// itself.
///
/// # Errors
///
/// Returns [`SugerirError::UnknownEntity`] if `movie_id` was never rated,
/// or [`SugerirError::InvalidHyperparameter`] if `item_sim` was computed
/// over the user axis.
pub fn similar_items(
    item_sim: &SimilarityMatrix,
    movie_id: u32,
    k: usize,
) -> Result<Vec<(u32, f32)>> {
    if item_sim.axis() != Axis::Items {
        return Err(SugerirError::invalid_hyperparameter(
            "item_sim",
            "user-axis similarity matrix",
            "a similarity matrix computed over Axis::Items",
        ));
    }
    let similarities = item_sim.row(movie_id)?;
    let scores: HashMap<u32, f32> = item_sim
        .ids()
        .iter()
        .zip(similarities)
        .map(|(&id, &sim)| (id, sim))
        .collect();
    let exclude = HashSet::from([movie_id]);
    Ok(rank_by_score(&scores, k, &exclude))
}

/// Ranks movies by how many users rated them.
///
/// The recovery path for [`SugerirError::EmptyNeighborhood`]: a cold-start
/// user with no usable neighbors still gets a deterministic global
/// ranking.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use sugerir::prelude::*;
///
/// let matrix = RatingMatrix::from_ratings(&[
///     Rating::new(1, 10, 5, 0).unwrap(),
///     Rating::new(2, 10, 1, 0).unwrap(),
///     Rating::new(2, 20, 5, 0).unwrap(),
/// ]).unwrap();
///
/// let top = popularity(&matrix, 1, &HashSet::new());
/// assert_eq!(top, vec![(10, 2.0)]);
/// ```
#[must_use]
pub fn popularity(matrix: &RatingMatrix, k: usize, exclude: &HashSet<u32>) -> Vec<(u32, f32)> {
    let counts: HashMap<u32, f32> = matrix
        .movie_ids()
        .iter()
        .map(|&m| {
            let raters = matrix.column(m).map_or(0, |col| col.len());
            (m, raters as f32)
        })
        .collect();
    rank_by_score(&counts, k, exclude)
}

#[cfg(test)]
#[path = "recommend_tests.rs"]
mod tests;

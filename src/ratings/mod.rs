//! Rating records and the sparse user×movie rating store.
//!
//! [`RatingMatrix`] is the foundation every strategy in this crate builds
//! on: a dual-indexed sparse matrix holding each observed `(user, movie)`
//! rating once, with per-user rows and per-movie columns kept sorted by
//! counterpart id so downstream sparse dot products and rankings are
//! deterministic.
//!
//! # Examples
//!
//! ```
//! use sugerir::ratings::{Rating, RatingMatrix};
//!
//! let ratings = vec![
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(1, 20, 3, 0).unwrap(),
//!     Rating::new(2, 10, 4, 0).unwrap(),
//! ];
//! let matrix = RatingMatrix::from_ratings(&ratings).unwrap();
//!
//! assert_eq!(matrix.n_users(), 2);
//! assert_eq!(matrix.n_movies(), 2);
//! assert_eq!(matrix.get(1, 10).unwrap(), Some(5.0));
//! assert_eq!(matrix.get(2, 20).unwrap(), None);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SugerirError};

/// One observed rating event. Immutable once loaded.
///
/// Scores live on a 1–5 scale; there is no 0. An absent cell in the
/// [`RatingMatrix`] means "no rating observed", not "rated 0".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating user
    pub user_id: u32,
    /// Rated movie
    pub movie_id: u32,
    /// Score in [1, 5]
    pub score: u8,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl Rating {
    /// Creates a rating, validating the score range.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::InvalidHyperparameter`] if `score` is
    /// outside [1, 5].
    pub fn new(user_id: u32, movie_id: u32, score: u8, timestamp: i64) -> Result<Self> {
        if !(1..=5).contains(&score) {
            return Err(SugerirError::invalid_hyperparameter(
                "score",
                score,
                "integer in [1, 5]",
            ));
        }
        Ok(Self {
            user_id,
            movie_id,
            score,
            timestamp,
        })
    }
}

/// Sparse user×movie rating matrix with dual (row and column) indexing.
///
/// Built once from a rating list and read-only afterward; concurrent
/// readers need no locking. Rows are `(movie_id, score)` pairs sorted by
/// movie id, columns are `(user_id, score)` pairs sorted by user id.
///
/// Duplicate `(user, movie)` pairs in the input collapse to the last
/// occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingMatrix {
    user_ids: Vec<u32>,
    movie_ids: Vec<u32>,
    user_index: HashMap<u32, usize>,
    movie_index: HashMap<u32, usize>,
    rows: Vec<Vec<(u32, f32)>>,
    cols: Vec<Vec<(u32, f32)>>,
    n_ratings: usize,
}

impl RatingMatrix {
    /// Builds the matrix from a rating list.
    ///
    /// Construction is O(r log r) in the number of ratings.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::InvalidHyperparameter`] if any score is
    /// outside [1, 5].
    ///
    /// # Examples
    ///
    /// ```
    /// use sugerir::ratings::{Rating, RatingMatrix};
    ///
    /// let matrix = RatingMatrix::from_ratings(&[
    ///     Rating::new(7, 100, 4, 0).unwrap(),
    /// ]).unwrap();
    /// assert_eq!(matrix.n_ratings(), 1);
    /// ```
    pub fn from_ratings(ratings: &[Rating]) -> Result<Self> {
        // BTreeMap gives ascending (user, movie) iteration and last-write-wins
        // deduplication in one pass.
        let mut cells: BTreeMap<(u32, u32), f32> = BTreeMap::new();
        for r in ratings {
            if !(1..=5).contains(&r.score) {
                return Err(SugerirError::invalid_hyperparameter(
                    "score",
                    r.score,
                    "integer in [1, 5]",
                ));
            }
            cells.insert((r.user_id, r.movie_id), f32::from(r.score));
        }

        let mut user_ids: Vec<u32> = cells.keys().map(|&(u, _)| u).collect();
        user_ids.dedup();
        let mut movie_ids: Vec<u32> = cells.keys().map(|&(_, m)| m).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let user_index: HashMap<u32, usize> =
            user_ids.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let movie_index: HashMap<u32, usize> =
            movie_ids.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let mut rows = vec![Vec::new(); user_ids.len()];
        let mut cols = vec![Vec::new(); movie_ids.len()];
        for (&(u, m), &score) in &cells {
            rows[user_index[&u]].push((m, score));
            cols[movie_index[&m]].push((u, score));
        }
        // Rows come out movie-sorted from the BTreeMap order; columns are
        // filled user-ascending for the same reason, so no re-sort needed.

        Ok(Self {
            n_ratings: cells.len(),
            user_ids,
            movie_ids,
            user_index,
            movie_index,
            rows,
            cols,
        })
    }

    /// Number of distinct users observed.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of distinct movies observed.
    #[must_use]
    pub fn n_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// Number of stored ratings (after deduplication).
    #[must_use]
    pub fn n_ratings(&self) -> usize {
        self.n_ratings
    }

    /// All observed user ids, ascending.
    #[must_use]
    pub fn user_ids(&self) -> &[u32] {
        &self.user_ids
    }

    /// All observed movie ids, ascending.
    #[must_use]
    pub fn movie_ids(&self) -> &[u32] {
        &self.movie_ids
    }

    /// Looks up the score for one cell.
    ///
    /// `Ok(None)` means both ids are known but the user never rated the
    /// movie.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] if either id was never
    /// observed in the input.
    pub fn get(&self, user_id: u32, movie_id: u32) -> Result<Option<f32>> {
        let row = self.row(user_id)?;
        if !self.movie_index.contains_key(&movie_id) {
            return Err(SugerirError::unknown_movie(movie_id));
        }
        Ok(row
            .binary_search_by_key(&movie_id, |&(m, _)| m)
            .ok()
            .map(|i| row[i].1))
    }

    /// All ratings by one user, as `(movie_id, score)` sorted by movie id.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] for a never-observed user.
    pub fn row(&self, user_id: u32) -> Result<&[(u32, f32)]> {
        self.user_index
            .get(&user_id)
            .map(|&i| self.rows[i].as_slice())
            .ok_or_else(|| SugerirError::unknown_user(user_id))
    }

    /// All ratings of one movie, as `(user_id, score)` sorted by user id.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] for a never-observed movie.
    pub fn column(&self, movie_id: u32) -> Result<&[(u32, f32)]> {
        self.movie_index
            .get(&movie_id)
            .map(|&i| self.cols[i].as_slice())
            .ok_or_else(|| SugerirError::unknown_movie(movie_id))
    }

    /// Whether `user_id` has rated `movie_id`. False for unknown ids.
    #[must_use]
    pub fn has_rated(&self, user_id: u32, movie_id: u32) -> bool {
        matches!(self.get(user_id, movie_id), Ok(Some(_)))
    }
}

#[cfg(test)]
#[path = "ratings_tests.rs"]
mod tests;

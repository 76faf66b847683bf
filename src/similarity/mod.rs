//! Pairwise cosine similarity over rating-matrix rows or columns.
//!
//! [`SimilarityMatrix::cosine`] computes the full symmetric n×n similarity
//! table for one axis of a [`RatingMatrix`] — user–user or movie–movie —
//! using sparse dot products over the sorted adjacency lists. With the
//! `parallel` feature the row blocks are sharded across Rayon workers;
//! each cell is written once, so the parallel and sequential results are
//! identical.
//!
//! Unobserved cells contribute 0 to both the dot product and the norms,
//! so "never rated" and "rated at the lowest extreme" are
//! indistinguishable for vector-length purposes. This is a known
//! approximation: mean-centering or co-rated-only sums would be sounder
//! models but change every output.
//!
//! # Examples
//!
//! ```
//! use sugerir::ratings::{Rating, RatingMatrix};
//! use sugerir::similarity::{Axis, SimilarityMatrix};
//!
//! let matrix = RatingMatrix::from_ratings(&[
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(2, 10, 5, 0).unwrap(),
//! ]).unwrap();
//!
//! let sim = SimilarityMatrix::cosine(&matrix, Axis::Users);
//! assert_eq!(sim.get(1, 2).unwrap(), 1.0);
//! assert_eq!(sim.get(1, 1).unwrap(), 1.0);
//! ```

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SugerirError};
use crate::ratings::RatingMatrix;

/// Which axis of the rating matrix to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Compare users by their rating rows (user-based CF).
    Users,
    /// Compare movies by their rating columns (item-based CF).
    Items,
}

/// Symmetric pairwise cosine similarity table for one axis.
///
/// Never mutated after construction. `sim(a, b) == sim(b, a)` for every
/// pair, the diagonal is exactly 1.0 (an entity with no ratings included),
/// and every off-diagonal value lies in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    axis: Axis,
    ids: Vec<u32>,
    index: HashMap<u32, usize>,
    data: Vec<f32>,
}

/// Dot product of two id-sorted sparse vectors.
fn sparse_dot(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

fn norm(v: &[(u32, f32)]) -> f32 {
    v.iter().map(|&(_, x)| x * x).sum::<f32>().sqrt()
}

impl SimilarityMatrix {
    /// Computes cosine similarity for every entity pair on `axis`.
    ///
    /// Cost is O(n² · v̄) where n is the axis size and v̄ the mean sparse
    /// vector length. Entities with an all-zero vector get similarity 0 to
    /// everything and 1 to themselves; no division by zero occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugerir::ratings::{Rating, RatingMatrix};
    /// use sugerir::similarity::{Axis, SimilarityMatrix};
    ///
    /// let matrix = RatingMatrix::from_ratings(&[
    ///     Rating::new(1, 10, 4, 0).unwrap(),
    ///     Rating::new(1, 20, 2, 0).unwrap(),
    ///     Rating::new(2, 20, 5, 0).unwrap(),
    /// ]).unwrap();
    /// let sim = SimilarityMatrix::cosine(&matrix, Axis::Items);
    ///
    /// assert_eq!(sim.get(10, 20).unwrap(), sim.get(20, 10).unwrap());
    /// ```
    #[must_use]
    pub fn cosine(matrix: &RatingMatrix, axis: Axis) -> Self {
        let ids: Vec<u32> = match axis {
            Axis::Users => matrix.user_ids().to_vec(),
            Axis::Items => matrix.movie_ids().to_vec(),
        };
        let vectors: Vec<&[(u32, f32)]> = ids
            .iter()
            .map(|&id| match axis {
                Axis::Users => matrix.row(id).expect("id taken from the matrix"),
                Axis::Items => matrix.column(id).expect("id taken from the matrix"),
            })
            .collect();
        let norms: Vec<f32> = vectors.iter().map(|v| norm(v)).collect();

        let n = ids.len();
        let upper_row = |i: usize| -> Vec<f32> {
            (i..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else if norms[i] == 0.0 || norms[j] == 0.0 {
                        0.0
                    } else {
                        let cos = sparse_dot(vectors[i], vectors[j]) / (norms[i] * norms[j]);
                        cos.clamp(-1.0, 1.0)
                    }
                })
                .collect()
        };

        #[cfg(feature = "parallel")]
        let upper: Vec<Vec<f32>> = (0..n).into_par_iter().map(upper_row).collect();
        #[cfg(not(feature = "parallel"))]
        let upper: Vec<Vec<f32>> = (0..n).map(upper_row).collect();

        let mut data = vec![0.0; n * n];
        for (i, row) in upper.iter().enumerate() {
            for (offset, &value) in row.iter().enumerate() {
                let j = i + offset;
                data[i * n + j] = value;
                data[j * n + i] = value;
            }
        }

        let index = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self {
            axis,
            ids,
            index,
            data,
        }
    }

    /// The axis this table was computed over.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Axis entity ids, ascending. Row order of [`SimilarityMatrix::row`].
    #[must_use]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Number of entities on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Similarity between two entities by public id.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] if either id is not on the
    /// axis.
    pub fn get(&self, a: u32, b: u32) -> Result<f32> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Ok(self.data[i * self.ids.len() + j])
    }

    /// One entity's similarities to every axis entity, aligned with
    /// [`SimilarityMatrix::ids`].
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] if `id` is not on the axis.
    pub fn row(&self, id: u32) -> Result<&[f32]> {
        let i = self.position(id)?;
        let n = self.ids.len();
        Ok(&self.data[i * n..(i + 1) * n])
    }

    fn position(&self, id: u32) -> Result<usize> {
        self.index.get(&id).copied().ok_or(match self.axis {
            Axis::Users => SugerirError::unknown_user(id),
            Axis::Items => SugerirError::unknown_movie(id),
        })
    }
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;

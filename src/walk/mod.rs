//! Weighted random walks over the bipartite interaction graph.
//!
//! A walk alternates between the two node sides by construction: from a
//! user it can only step to a movie and vice versa. Each step either
//! restarts at the walk's start node (with [`WalkConfig::restart_probability`])
//! or moves to a neighbor chosen with probability proportional to edge
//! weight, so higher-rated edges are followed more often. Every landing on
//! a movie node increments that movie's visit count.
//!
//! All randomness comes from explicitly seeded [`StdRng`] streams: walk
//! `w` of a request draws from `seed + w`, which makes results
//! reproducible at any degree of parallelism.
//!
//! # Examples
//!
//! ```
//! use sugerir::graph::{BipartiteGraph, Node};
//! use sugerir::ratings::Rating;
//! use sugerir::walk::{visit_counts, WalkConfig};
//!
//! let graph = BipartiteGraph::from_ratings(&[
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(1, 20, 3, 0).unwrap(),
//! ]).unwrap();
//!
//! let counts = visit_counts(&graph, Node::User(1), &WalkConfig::default()).unwrap();
//! let total: u32 = counts.values().sum();
//! assert!(total > 0);
//! ```

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SugerirError};
use crate::graph::{BipartiteGraph, Node, NodeIndex};

/// Seed used when the caller does not pick one. Walks are deterministic
/// either way; this constant just names the default stream.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Configuration for [`visit_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Steps per walk. Zero yields an empty count mapping.
    pub walk_length: usize,
    /// Independent walks to accumulate; more walks, less variance.
    pub num_walks: usize,
    /// Per-step probability of jumping back to the start node.
    /// 0.0 is a pure walk; values toward 1.0 bias scores to the start's
    /// immediate neighborhood.
    pub restart_probability: f32,
    /// Base seed; walk `w` uses `seed + w`.
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            walk_length: 20,
            num_walks: 10,
            restart_probability: 0.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl WalkConfig {
    /// Checks every parameter range before any computation starts.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::InvalidHyperparameter`] if
    /// `restart_probability` is NaN or outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.restart_probability) {
            return Err(SugerirError::invalid_hyperparameter(
                "restart_probability",
                self.restart_probability,
                "float in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Picks an adjacency slot with probability proportional to its weight.
///
/// Callers guarantee a non-empty slice; every node in a rating-built
/// graph has at least one incident edge.
fn pick_weighted(adj: &[usize], weights: &[f32], rng: &mut StdRng) -> usize {
    let total: f32 = weights.iter().sum();
    let mut x = rng.gen::<f32>() * total;
    for (&neighbor, &w) in adj.iter().zip(weights) {
        x -= w;
        if x <= 0.0 {
            return neighbor;
        }
    }
    adj[adj.len() - 1]
}

fn walk_from(
    graph: &BipartiteGraph,
    start: NodeIndex,
    length: usize,
    restart_probability: f32,
    rng: &mut StdRng,
) -> HashMap<u32, u32> {
    let mut counts = HashMap::new();
    let start_degree = match start {
        NodeIndex::User(u) => graph.user_adjacency(u).0.len(),
        NodeIndex::Movie(m) => graph.movie_adjacency(m).0.len(),
    };
    if start_degree == 0 {
        // Isolated start: the walk cannot proceed past step 0.
        return counts;
    }

    let mut current = start;
    for _ in 0..length {
        current = if rng.gen::<f32>() < restart_probability {
            start
        } else {
            match current {
                NodeIndex::User(u) => {
                    let (adj, weights) = graph.user_adjacency(u);
                    NodeIndex::Movie(pick_weighted(adj, weights, rng))
                }
                NodeIndex::Movie(m) => {
                    let (adj, weights) = graph.movie_adjacency(m);
                    NodeIndex::User(pick_weighted(adj, weights, rng))
                }
            }
        };
        if let NodeIndex::Movie(m) = current {
            *counts.entry(graph.movie_id_at(m)).or_insert(0) += 1;
        }
    }
    counts
}

/// Runs one walk of `length` steps from `start`, returning per-movie
/// visit counts.
///
/// Identical `(graph, start, length, restart_probability, rng state)`
/// produce identical counts. A `length` of 0 or an isolated start yields
/// an empty mapping rather than an error.
///
/// # Errors
///
/// - [`SugerirError::UnknownEntity`] if `start` is not in the graph.
/// - [`SugerirError::InvalidHyperparameter`] if `restart_probability` is
///   NaN or outside [0, 1].
pub fn single_walk(
    graph: &BipartiteGraph,
    start: Node,
    length: usize,
    restart_probability: f32,
    rng: &mut StdRng,
) -> Result<HashMap<u32, u32>> {
    if !(0.0..=1.0).contains(&restart_probability) {
        return Err(SugerirError::invalid_hyperparameter(
            "restart_probability",
            restart_probability,
            "float in [0, 1]",
        ));
    }
    let start_idx = graph.index_of(start)?;
    Ok(walk_from(graph, start_idx, length, restart_probability, rng))
}

/// Sums per-walk count mappings into one. Commutative and associative, so
/// any merge order gives the same result.
#[must_use]
pub fn merge_counts(partials: impl IntoIterator<Item = HashMap<u32, u32>>) -> HashMap<u32, u32> {
    let mut merged = HashMap::new();
    for partial in partials {
        for (movie, count) in partial {
            *merged.entry(movie).or_insert(0) += count;
        }
    }
    merged
}

/// Runs [`WalkConfig::num_walks`] independent walks from `start` and merges
/// their counts.
///
/// Walk `w` draws from its own `StdRng` seeded with `config.seed + w`, so
/// the combined result does not depend on execution order; with the
/// `parallel` feature the walks run on Rayon workers and produce the same
/// counts as the sequential path.
///
/// # Errors
///
/// - [`SugerirError::InvalidHyperparameter`] for an out-of-range config.
/// - [`SugerirError::UnknownEntity`] if `start` is not in the graph.
pub fn visit_counts(
    graph: &BipartiteGraph,
    start: Node,
    config: &WalkConfig,
) -> Result<HashMap<u32, u32>> {
    config.validate()?;
    let start_idx = graph.index_of(start)?;

    let run = |w: usize| {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(w as u64));
        walk_from(
            graph,
            start_idx,
            config.walk_length,
            config.restart_probability,
            &mut rng,
        )
    };

    #[cfg(feature = "parallel")]
    let partials: Vec<HashMap<u32, u32>> = (0..config.num_walks).into_par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let partials: Vec<HashMap<u32, u32>> = (0..config.num_walks).map(run).collect();

    Ok(merge_counts(partials))
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;

//! User–movie interaction graph with cache-optimized CSR adjacency.
//!
//! [`BipartiteGraph`] connects user nodes and movie nodes, one weighted
//! edge per observed rating. Each side stores its adjacency in Compressed
//! Sparse Row form (two flat vectors plus an offset table), so neighbor
//! iteration is a contiguous slice scan — the access pattern the
//! random-walk sampler hammers.
//!
//! Users and movies live in disjoint index spaces and edges can only be
//! recorded between the two sides, so the bipartite invariant holds by
//! construction.
//!
//! # Examples
//!
//! ```
//! use sugerir::graph::{BipartiteGraph, Node};
//! use sugerir::ratings::Rating;
//!
//! let g = BipartiteGraph::from_ratings(&[
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(1, 20, 3, 0).unwrap(),
//! ]).unwrap();
//!
//! assert_eq!(g.degree(Node::User(1)).unwrap(), 2);
//! assert_eq!(g.degree(Node::Movie(10)).unwrap(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SugerirError};
use crate::ratings::Rating;

/// Typed handle for a graph node, carrying the public id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    /// A user node
    User(u32),
    /// A movie node
    Movie(u32),
}

/// Side-local node position, resolved once per lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeIndex {
    User(usize),
    Movie(usize),
}

/// Weighted user–movie adjacency, CSR per side.
///
/// Built once from the full rating list and immutable afterward; rebuild
/// when the rating set changes. Edge weight is the raw rating score (1–5).
/// Duplicate `(user, movie)` pairs collapse to the last occurrence,
/// matching [`crate::ratings::RatingMatrix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BipartiteGraph {
    user_ids: Vec<u32>,
    movie_ids: Vec<u32>,
    user_index: HashMap<u32, usize>,
    movie_index: HashMap<u32, usize>,

    // CSR, user side: neighbors of user u are movie indices in
    // user_adj[user_row_ptr[u]..user_row_ptr[u + 1]].
    user_row_ptr: Vec<usize>,
    user_adj: Vec<usize>,
    user_weights: Vec<f32>,

    // CSR, movie side.
    movie_row_ptr: Vec<usize>,
    movie_adj: Vec<usize>,
    movie_weights: Vec<f32>,

    n_edges: usize,
}

impl BipartiteGraph {
    /// Builds the graph from a rating list in O(r log r).
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::InvalidHyperparameter`] if any score is
    /// outside [1, 5].
    pub fn from_ratings(ratings: &[Rating]) -> Result<Self> {
        let mut edges: BTreeMap<(u32, u32), f32> = BTreeMap::new();
        for r in ratings {
            if !(1..=5).contains(&r.score) {
                return Err(SugerirError::invalid_hyperparameter(
                    "score",
                    r.score,
                    "integer in [1, 5]",
                ));
            }
            edges.insert((r.user_id, r.movie_id), f32::from(r.score));
        }

        let mut user_ids: Vec<u32> = edges.keys().map(|&(u, _)| u).collect();
        user_ids.dedup();
        let mut movie_ids: Vec<u32> = edges.keys().map(|&(_, m)| m).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let user_index: HashMap<u32, usize> =
            user_ids.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let movie_index: HashMap<u32, usize> =
            movie_ids.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let n_edges = edges.len();
        let mut user_degree = vec![0usize; user_ids.len()];
        let mut movie_degree = vec![0usize; movie_ids.len()];
        for &(u, m) in edges.keys() {
            user_degree[user_index[&u]] += 1;
            movie_degree[movie_index[&m]] += 1;
        }

        let prefix_sum = |degrees: &[usize]| {
            let mut ptr = Vec::with_capacity(degrees.len() + 1);
            ptr.push(0);
            for &d in degrees {
                ptr.push(ptr[ptr.len() - 1] + d);
            }
            ptr
        };
        let user_row_ptr = prefix_sum(&user_degree);
        let movie_row_ptr = prefix_sum(&movie_degree);

        let mut user_adj = vec![0usize; n_edges];
        let mut user_weights = vec![0.0f32; n_edges];
        let mut movie_adj = vec![0usize; n_edges];
        let mut movie_weights = vec![0.0f32; n_edges];
        let mut user_fill = user_row_ptr.clone();
        let mut movie_fill = movie_row_ptr.clone();
        for (&(u, m), &w) in &edges {
            let ui = user_index[&u];
            let mi = movie_index[&m];
            user_adj[user_fill[ui]] = mi;
            user_weights[user_fill[ui]] = w;
            user_fill[ui] += 1;
            movie_adj[movie_fill[mi]] = ui;
            movie_weights[movie_fill[mi]] = w;
            movie_fill[mi] += 1;
        }

        Ok(Self {
            user_ids,
            movie_ids,
            user_index,
            movie_index,
            user_row_ptr,
            user_adj,
            user_weights,
            movie_row_ptr,
            movie_adj,
            movie_weights,
            n_edges,
        })
    }

    /// Number of user nodes.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of movie nodes.
    #[must_use]
    pub fn n_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// Number of edges (distinct rated pairs).
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    /// Whether `node` exists in the graph.
    #[must_use]
    pub fn contains(&self, node: Node) -> bool {
        self.index_of(node).is_ok()
    }

    /// Number of edges incident to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] for an absent node.
    pub fn degree(&self, node: Node) -> Result<usize> {
        Ok(match self.index_of(node)? {
            NodeIndex::User(u) => self.user_row_ptr[u + 1] - self.user_row_ptr[u],
            NodeIndex::Movie(m) => self.movie_row_ptr[m + 1] - self.movie_row_ptr[m],
        })
    }

    /// Neighbors of `node` with their edge weights.
    ///
    /// A user's neighbors are all movie nodes and vice versa.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownEntity`] for an absent node.
    pub fn neighbors(&self, node: Node) -> Result<impl Iterator<Item = (Node, f32)> + '_> {
        let idx = self.index_of(node)?;
        let (adj, weights, movie_side) = match idx {
            NodeIndex::User(u) => {
                let (s, e) = (self.user_row_ptr[u], self.user_row_ptr[u + 1]);
                (&self.user_adj[s..e], &self.user_weights[s..e], true)
            }
            NodeIndex::Movie(m) => {
                let (s, e) = (self.movie_row_ptr[m], self.movie_row_ptr[m + 1]);
                (&self.movie_adj[s..e], &self.movie_weights[s..e], false)
            }
        };
        Ok(adj.iter().zip(weights).map(move |(&i, &w)| {
            let neighbor = if movie_side {
                Node::Movie(self.movie_ids[i])
            } else {
                Node::User(self.user_ids[i])
            };
            (neighbor, w)
        }))
    }

    /// Every edge as `(user node, movie node, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node, f32)> + '_ {
        (0..self.user_ids.len()).flat_map(move |u| {
            let (s, e) = (self.user_row_ptr[u], self.user_row_ptr[u + 1]);
            self.user_adj[s..e]
                .iter()
                .zip(&self.user_weights[s..e])
                .map(move |(&mi, &w)| {
                    (
                        Node::User(self.user_ids[u]),
                        Node::Movie(self.movie_ids[mi]),
                        w,
                    )
                })
        })
    }

    pub(crate) fn index_of(&self, node: Node) -> Result<NodeIndex> {
        match node {
            Node::User(id) => self
                .user_index
                .get(&id)
                .map(|&i| NodeIndex::User(i))
                .ok_or_else(|| SugerirError::unknown_user(id)),
            Node::Movie(id) => self
                .movie_index
                .get(&id)
                .map(|&i| NodeIndex::Movie(i))
                .ok_or_else(|| SugerirError::unknown_movie(id)),
        }
    }

    /// Adjacency slice for a user index: (movie indices, weights).
    pub(crate) fn user_adjacency(&self, u: usize) -> (&[usize], &[f32]) {
        let (s, e) = (self.user_row_ptr[u], self.user_row_ptr[u + 1]);
        (&self.user_adj[s..e], &self.user_weights[s..e])
    }

    /// Adjacency slice for a movie index: (user indices, weights).
    pub(crate) fn movie_adjacency(&self, m: usize) -> (&[usize], &[f32]) {
        let (s, e) = (self.movie_row_ptr[m], self.movie_row_ptr[m + 1]);
        (&self.movie_adj[s..e], &self.movie_weights[s..e])
    }

    /// Public movie id for a movie index.
    pub(crate) fn movie_id_at(&self, m: usize) -> u32 {
        self.movie_ids[m]
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;

//! Sugerir: movie recommendations from sparse rating histories.
//!
//! Sugerir produces ranked movie recommendations with three independent
//! strategies over one rating list: user-based collaborative filtering,
//! item-based collaborative filtering, and a weighted random-walk sampler
//! over the user–movie interaction graph. All three funnel through a
//! single ranking contract (score descending, ascending movie id on
//! ties), so callers get one deterministic list shape regardless of
//! strategy.
//!
//! The crate is the recommendation core only: it consumes already-parsed
//! [`ratings::Rating`] records and returns `(movie_id, score)` lists.
//! File parsing, timestamp handling, and movie-title lookup belong to the
//! caller.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::prelude::*;
//!
//! let ratings = vec![
//!     Rating::new(1, 10, 5, 0).unwrap(),
//!     Rating::new(1, 20, 4, 0).unwrap(),
//!     Rating::new(2, 10, 5, 0).unwrap(),
//!     Rating::new(3, 10, 1, 0).unwrap(),
//!     Rating::new(3, 30, 5, 0).unwrap(),
//! ];
//!
//! // Collaborative filtering path.
//! let matrix = RatingMatrix::from_ratings(&ratings).unwrap();
//! let sim = SimilarityMatrix::cosine(&matrix, Axis::Users);
//! let recs = recommend_for_user(&matrix, &sim, 2, 5, &UserRecConfig::default()).unwrap();
//! assert!(!recs.is_empty());
//!
//! // Random-walk path over the same data.
//! let graph = BipartiteGraph::from_ratings(&ratings).unwrap();
//! let counts = visit_counts(&graph, Node::User(2), &WalkConfig::default()).unwrap();
//! let ranked = rank_counts(&counts, 5, &Default::default());
//! # let _ = ranked;
//! ```
//!
//! # Modules
//!
//! - [`ratings`]: Rating records and the sparse user×movie matrix
//! - [`similarity`]: pairwise cosine similarity over users or movies
//! - [`recommend`]: user-based CF, item-based CF, popularity fallback
//! - [`graph`]: weighted bipartite user–movie graph (CSR adjacency)
//! - [`walk`]: seeded weighted random walks with per-movie visit counts
//! - [`rank`]: the shared top-k ranking/tie-break contract
//! - [`error`]: crate-wide error type
//!
//! # Determinism
//!
//! Every operation is a pure function of its inputs; the walk strategy
//! takes an explicit seed ([`walk::WalkConfig::seed`], default
//! [`walk::DEFAULT_SEED`]) and derives one RNG stream per walk, so results
//! are reproducible at any degree of parallelism. Enable the `parallel`
//! cargo feature to shard similarity rows and independent walks across
//! Rayon workers without changing any output.

pub mod error;
pub mod graph;
pub mod prelude;
pub mod rank;
pub mod ratings;
pub mod recommend;
pub mod similarity;
pub mod walk;

pub use error::{Result, SugerirError};
pub use ratings::{Rating, RatingMatrix};
pub use similarity::{Axis, SimilarityMatrix};

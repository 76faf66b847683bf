//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sugerir::prelude::*;
//! ```

pub use crate::error::{Result, SugerirError};
pub use crate::graph::{BipartiteGraph, Node};
pub use crate::rank::{rank_by_score, rank_counts};
pub use crate::ratings::{Rating, RatingMatrix};
pub use crate::recommend::{popularity, recommend_for_user, similar_items, UserRecConfig};
pub use crate::similarity::{Axis, SimilarityMatrix};
pub use crate::walk::{merge_counts, single_walk, visit_counts, WalkConfig, DEFAULT_SEED};

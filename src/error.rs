//! Error types for Sugerir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Sugerir operations.
///
/// Covers lookups of ids that were never observed, degenerate
/// neighborhoods, and out-of-range configuration values.
///
/// # Examples
///
/// ```
/// use sugerir::error::SugerirError;
///
/// let err = SugerirError::UnknownEntity {
///     kind: "user",
///     id: 42,
/// };
/// assert!(err.to_string().contains("unknown user"));
/// ```
#[derive(Debug)]
pub enum SugerirError {
    /// A requested user, movie, or walk-start id was never observed
    /// in the data the structure was built from.
    UnknownEntity {
        /// Entity kind ("user" or "movie")
        kind: &'static str,
        /// The id that failed to resolve
        id: u32,
    },

    /// No other user has positive similarity to the query user.
    ///
    /// Recoverable: callers may fall back to a popularity ranking
    /// (see [`crate::recommend::popularity`]).
    EmptyNeighborhood {
        /// The query user
        user_id: u32,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SugerirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SugerirError::UnknownEntity { kind, id } => {
                write!(f, "unknown {kind} id {id}: not present in the input data")
            }
            SugerirError::EmptyNeighborhood { user_id } => {
                write!(
                    f,
                    "empty neighborhood for user {user_id}: no other user has positive similarity"
                )
            }
            SugerirError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            SugerirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SugerirError {}

impl From<&str> for SugerirError {
    fn from(msg: &str) -> Self {
        SugerirError::Other(msg.to_string())
    }
}

impl From<String> for SugerirError {
    fn from(msg: String) -> Self {
        SugerirError::Other(msg)
    }
}

impl SugerirError {
    /// Create an unknown-user error.
    #[must_use]
    pub fn unknown_user(id: u32) -> Self {
        Self::UnknownEntity { kind: "user", id }
    }

    /// Create an unknown-movie error.
    #[must_use]
    pub fn unknown_movie(id: u32) -> Self {
        Self::UnknownEntity { kind: "movie", id }
    }

    /// Create an invalid-hyperparameter error with descriptive context.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience result type for Sugerir operations.
pub type Result<T> = std::result::Result<T, SugerirError>;

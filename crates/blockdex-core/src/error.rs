//! Error types for blockdex.

use thiserror::Error;

/// Result type alias using blockdex's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for blockdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Session cannot start (e.g. no spaces configured)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend query failed, with the failing stage named
    #[error("Query error while {stage}: {source}")]
    Query {
        /// Stage that failed: "query" or "scan row"
        stage: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// External cancellation observed mid-operation
    #[error("Search cancelled")]
    Cancelled,

    /// Search pipeline failure outside the backend
    #[error("Search error: {0}")]
    Search(String),
}

impl Error {
    /// Wrap a backend error with its failing stage.
    pub fn query(stage: &'static str, source: sqlx::Error) -> Self {
        Error::Query { stage, source }
    }
}

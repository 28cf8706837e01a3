//! Space handles and the search session.
//!
//! A space is one independently indexed collection backed by its own
//! SQLite file. The session (`BlockRepo`) owns one read-only pool per
//! configured space for the duration of an invocation.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use blockdex_core::defaults::{SEARCH_FETCH_LIMIT, SEARCH_RESULT_LIMIT};
use blockdex_core::{Error, Result};

/// One independently indexed collection and its backing index handle.
#[derive(Debug, Clone)]
pub struct Space {
    /// Opaque space identifier.
    pub id: String,
    /// Connection pool over the space's search index file.
    pub pool: SqlitePool,
}

impl Space {
    /// Wrap an already-opened pool. Index discovery stays external; the
    /// session only consumes `(space id, handle)` pairs.
    pub fn new(id: impl Into<String>, pool: SqlitePool) -> Self {
        Self { id: id.into(), pool }
    }

    /// Open a read-only single-connection pool over an index file.
    pub async fn open(id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| Error::query("query", e))?;

        let id = id.into();
        debug!(space_id = %id, path = %path.as_ref().display(), "opened search index");

        Ok(Self { id, pool })
    }
}

/// Session configuration.
///
/// Replaces ambient package-level constants with an explicit struct that
/// is constructed once per invocation and passed to the session.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Rows requested per space before ranking and filtering.
    pub fetch_limit: i64,
    /// Display cap on final results.
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch_limit: SEARCH_FETCH_LIMIT,
            result_limit: SEARCH_RESULT_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-space fetch buffer size.
    pub fn fetch_limit(mut self, n: i64) -> Self {
        self.fetch_limit = n;
        self
    }

    /// Set the display cap.
    pub fn result_limit(mut self, n: usize) -> Self {
        self.result_limit = n;
        self
    }
}

/// Search session over every configured space.
///
/// Stateless between calls apart from the owned pools; closed exactly once
/// at the end of the invocation.
pub struct BlockRepo {
    spaces: Vec<Space>,
    config: SearchConfig,
}

impl BlockRepo {
    /// Create a session with default configuration.
    ///
    /// Fails with a configuration error when no spaces are given: the
    /// operation cannot start without at least one index.
    pub fn new(spaces: Vec<Space>) -> Result<Self> {
        Self::with_config(spaces, SearchConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(spaces: Vec<Space>, config: SearchConfig) -> Result<Self> {
        if spaces.is_empty() {
            return Err(Error::Config("no spaces configured".to_string()));
        }
        info!(space_count = spaces.len(), "search session created");
        Ok(Self { spaces, config })
    }

    /// All configured spaces, in configuration order.
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Session configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolve which spaces a request is scoped to.
    ///
    /// An unknown primary space id degrades to searching all spaces rather
    /// than failing the operation on a stale selection.
    pub(crate) fn spaces_in_scope(
        &self,
        all_spaces: bool,
        primary_space: Option<&str>,
    ) -> Vec<&Space> {
        if all_spaces {
            return self.spaces.iter().collect();
        }

        if let Some(primary) = primary_space {
            let selected: Vec<&Space> =
                self.spaces.iter().filter(|s| s.id == primary).collect();
            if !selected.is_empty() {
                return selected;
            }
            debug!(primary_space = %primary, "primary space not configured, searching all spaces");
        }

        self.spaces.iter().collect()
    }

    /// Close every space's pool, best-effort across all spaces.
    pub async fn close(&self) {
        for space in &self.spaces {
            space.pool.close().await;
        }
        info!(space_count = self.spaces.len(), "search session closed");
    }
}

//! # blockdex-db
//!
//! SQLite search-index layer for blockdex.
//!
//! This crate provides:
//! - Per-space connection handles and the `BlockRepo` session
//! - FTS5 MATCH expression building with defensive quoting
//! - The multi-space executor with a substring-scan fallback for index
//!   files whose FTS5 module or table is unavailable
//! - Batched parent-document name resolution for fragment results
//!
//! ## Example
//!
//! ```rust,ignore
//! use blockdex_core::{BlockSource, SearchRequest};
//! use blockdex_db::{BlockRepo, Space};
//! use tokio_util::sync::CancellationToken;
//!
//! let spaces = vec![Space::open("space-id", "/path/to/SearchIndex.sqlite").await?];
//! let repo = BlockRepo::new(spaces)?;
//! let blocks = repo
//!     .fetch_blocks(&SearchRequest::new(vec!["todo".into()]), &CancellationToken::new())
//!     .await?;
//! repo.close().await;
//! ```

pub mod backfill;
pub mod query;
pub mod search;
pub mod space;

// Re-export core types
pub use blockdex_core::*;

pub use query::{build_match_expression, escape_like};
pub use search::is_fulltext_unavailable;
pub use space::{BlockRepo, SearchConfig, Space};

//! # blockdex-search
//!
//! Scoring, ranking, and post-processing for blockdex.
//!
//! This crate provides:
//! - Match-quality scoring of aggregated blocks against the search phrase
//! - A deterministic, stable multi-key ranking order
//! - Date-title suppression and result capping
//! - Parent-title backfill labels for fragment results
//! - The `SearchEngine` orchestrator tying fetch, rank, and filter together
//!
//! ## Example
//!
//! ```rust,ignore
//! use blockdex_core::SearchRequest;
//! use blockdex_db::{BlockRepo, Space};
//! use blockdex_search::SearchEngine;
//! use tokio_util::sync::CancellationToken;
//!
//! let repo = BlockRepo::new(spaces)?;
//! let engine = SearchEngine::new(repo);
//! let results = engine
//!     .search_with_titles(
//!         &SearchRequest::new(vec!["my".into(), "todo".into()]),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! ```

pub mod engine;
pub mod postprocess;
pub mod score;

// Re-export core types
pub use blockdex_core::*;

pub use engine::SearchEngine;
pub use postprocess::{backfill_document_names, filter_date_titles};
pub use score::{rank_blocks, MatchScore};

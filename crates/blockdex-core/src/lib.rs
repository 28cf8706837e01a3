//! # blockdex-core
//!
//! Core types, traits, and abstractions for the blockdex search library.
//!
//! This crate provides the foundational data structures, the error type,
//! and the pure text-matching utilities that the database and search
//! crates depend on.

pub mod defaults;
pub mod error;
pub mod matching;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use matching::{contains_all_words, contains_ordered_words, is_date_title};
pub use models::{Block, DocKey, EntityKind};
pub use traits::{BlockSource, SearchRequest};

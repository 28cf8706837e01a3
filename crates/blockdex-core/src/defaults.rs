//! Centralized default constants for blockdex.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SEARCH LIMITS
// =============================================================================

/// Rows requested per space before ranking and filtering.
///
/// Larger than the display cap so that date-title suppression and the
/// multi-word match filter never force a second round trip.
pub const SEARCH_FETCH_LIMIT: i64 = 200;

/// Display cap on final results after filtering.
pub const SEARCH_RESULT_LIMIT: usize = 40;

// =============================================================================
// INDEX SCHEMA
// =============================================================================

/// Name of the FTS5 virtual table inside each space's search index.
pub const FULLTEXT_TABLE: &str = "BlockSearch";

/// Shadow/content table name variants for the substring-scan fallback,
/// tried in priority order. `BlockSearch_content` is the shape current
/// index files ship with; `Block_content` covers older index files.
pub const FALLBACK_TABLES: &[&str] = &["BlockSearch_content", "Block_content"];

/// Raw entity type value marking a top-level document row.
pub const ENTITY_TYPE_DOCUMENT: &str = "document";

// =============================================================================
// DISPLAY LABELS
// =============================================================================

/// Synthesized display label for document results.
pub const DOCUMENT_LABEL: &str = "[Document]";

/// Prefix for the synthesized display label of fragment results.
pub const BLOCK_LABEL_PREFIX: &str = "[Block] ";

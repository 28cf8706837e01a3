//! Core traits for blockdex abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::{Block, DocKey};

/// Request for a block search.
///
/// Terms keep user order; duplicates are allowed. An empty term list asks
/// for a backend-ordered browse list instead of a text match.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Ordered user-supplied search terms.
    pub terms: Vec<String>,
    /// Search every configured space instead of just the primary one.
    pub all_spaces: bool,
    /// Keep date-titled documents (daily notes) in the results.
    pub include_daily: bool,
    /// Preferred space to search when `all_spaces` is false. An id that
    /// matches no configured space degrades to searching all spaces.
    pub primary_space: Option<String>,
}

impl SearchRequest {
    /// Create a request for the given terms.
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            terms,
            ..Default::default()
        }
    }

    /// Search every configured space.
    pub fn all_spaces(mut self) -> Self {
        self.all_spaces = true;
        self
    }

    /// Keep daily (date-titled) documents in the results.
    pub fn with_daily(mut self) -> Self {
        self.include_daily = true;
        self
    }

    /// Restrict to a primary space by id.
    pub fn with_primary_space(mut self, space_id: impl Into<String>) -> Self {
        self.primary_space = Some(space_id.into());
        self
    }
}

/// Source of raw, retrieval-ordered blocks.
///
/// Implemented by the database layer; the search engine only talks to this
/// trait so ranking and post-processing can be tested against a mock.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch deduplicated candidate blocks from every in-scope space, in
    /// backend retrieval order.
    async fn fetch_blocks(
        &self,
        req: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>>;

    /// Resolve parent-document contents for the given blocks' fragments,
    /// batched per owning space.
    async fn resolve_document_names(
        &self,
        blocks: &[Block],
        cancel: &CancellationToken,
    ) -> Result<HashMap<DocKey, String>>;
}

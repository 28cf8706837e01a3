//! Search engine orchestration.
//!
//! Ties the pipeline together: fetch candidates from a `BlockSource`,
//! re-rank them, suppress daily notes, cap the list, and optionally
//! backfill parent-document labels.

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use blockdex_core::defaults::SEARCH_RESULT_LIMIT;
use blockdex_core::{Block, BlockSource, Result, SearchRequest};

use crate::postprocess::{backfill_document_names, filter_date_titles};
use crate::score::rank_blocks;

/// Search pipeline over any block source.
///
/// Generic over [`BlockSource`] so ranking and filtering behavior can be
/// tested without a real index. Zero matches is an `Ok(vec![])`, distinct
/// from failure, so callers can offer a creation affordance instead.
pub struct SearchEngine<S> {
    source: S,
    result_limit: usize,
}

impl<S: BlockSource> SearchEngine<S> {
    /// Create an engine with the default display cap.
    pub fn new(source: S) -> Self {
        Self {
            source,
            result_limit: SEARCH_RESULT_LIMIT,
        }
    }

    /// Override the display cap.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the full pipeline without title backfill.
    ///
    /// Empty terms skip ranking entirely and return the backend-ordered
    /// browse list, filtered and capped like any other result set.
    #[instrument(skip(self, cancel), fields(term_count = req.terms.len()))]
    pub async fn search(
        &self,
        req: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>> {
        let candidates = self.source.fetch_blocks(req, cancel).await?;
        let ranked = rank_blocks(candidates, &req.terms);
        let results = filter_date_titles(ranked, req.include_daily, self.result_limit);
        debug!(result_count = results.len(), "search complete");
        Ok(results)
    }

    /// Run the full pipeline and attach parent-document labels.
    pub async fn search_with_titles(
        &self,
        req: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>> {
        let results = self.search(req, cancel).await?;
        let names = self.source.resolve_document_names(&results, cancel).await?;
        Ok(backfill_document_names(&results, &names))
    }
}

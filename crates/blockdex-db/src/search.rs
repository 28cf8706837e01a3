//! Multi-space search executor.
//!
//! Runs the full-text query against each in-scope space and degrades to a
//! substring scan over the index's shadow tables when the FTS5 module or
//! table is unavailable. Results are deduplicated per `(space, id)` and
//! aggregated in backend retrieval order; ranking happens downstream.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use blockdex_core::defaults::{FALLBACK_TABLES, FULLTEXT_TABLE};
use blockdex_core::{Block, BlockSource, DocKey, EntityKind, Error, Result, SearchRequest};

use crate::query::{build_match_expression, escape_like};
use crate::space::{BlockRepo, Space};

/// Heuristic probe for full-text capability on an error.
///
/// The backend reports a missing FTS5 module or a missing virtual table
/// only through its message text, so capability detection is a best-effort
/// string check. Every call site goes through this single predicate so the
/// heuristic can be swapped for a structured check later.
pub fn is_fulltext_unavailable(err: &sqlx::Error) -> bool {
    let msg = err.to_string();
    msg.contains("no such module") || msg.contains("no such table")
}

/// Why a single backend call did not produce rows.
pub(crate) enum QueryFailure {
    Cancelled,
    Backend(sqlx::Error),
}

/// Run a query to completion unless the token cancels first.
pub(crate) async fn fetch_all_cancellable(
    sql: &str,
    binds: Vec<String>,
    limit: i64,
    space: &Space,
    cancel: &CancellationToken,
) -> std::result::Result<Vec<SqliteRow>, QueryFailure> {
    let mut q = sqlx::query(sql);
    for bind in binds {
        q = q.bind(bind);
    }
    q = q.bind(limit);

    tokio::select! {
        _ = cancel.cancelled() => Err(QueryFailure::Cancelled),
        rows = q.fetch_all(&space.pool) => rows.map_err(QueryFailure::Backend),
    }
}

/// Decode one backend row into a block owned by `space_id`.
pub(crate) fn block_from_row(space_id: &str, row: &SqliteRow) -> Result<Block> {
    let id: String = row
        .try_get("id")
        .map_err(|e| Error::query("scan row", e))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| Error::query("scan row", e))?;
    let entity_type: String = row
        .try_get("entityType")
        .map_err(|e| Error::query("scan row", e))?;
    let document_id: Option<String> = row
        .try_get("documentId")
        .map_err(|e| Error::query("scan row", e))?;

    Ok(Block {
        id,
        space_id: space_id.to_string(),
        content,
        entity_kind: EntityKind::from_raw(&entity_type),
        document_id: document_id.unwrap_or_default(),
        document_name: None,
    })
}

impl BlockRepo {
    /// Query one space through the FTS5 virtual table.
    ///
    /// Returns raw rows so the caller can distinguish a capability probe
    /// on the query itself from a decode failure on a row.
    async fn fulltext_rows(
        &self,
        space: &Space,
        expr: &str,
        limit: i64,
        cancel: &CancellationToken,
    ) -> std::result::Result<Vec<SqliteRow>, QueryFailure> {
        let sql = if expr.is_empty() {
            // Browse: backend importance order, documents only.
            format!(
                "SELECT id, content, entityType, documentId FROM {FULLTEXT_TABLE} \
                 WHERE entityType = 'document' ORDER BY customRank LIMIT ?"
            )
        } else {
            format!(
                "SELECT id, content, entityType, documentId FROM {FULLTEXT_TABLE}(?) \
                 ORDER BY rank, customRank LIMIT ?"
            )
        };

        let binds = if expr.is_empty() {
            Vec::new()
        } else {
            vec![expr.to_string()]
        };

        fetch_all_cancellable(&sql, binds, limit, space, cancel).await
    }

    /// Substring-scan fallback over the index's shadow tables.
    ///
    /// Tries each known table name variant in priority order; the first
    /// one that answers wins. Exhausting every variant is fatal.
    async fn fallback_blocks(
        &self,
        space: &Space,
        terms: &[String],
        limit: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>> {
        let mut last_err: Option<sqlx::Error> = None;

        for table in FALLBACK_TABLES {
            let (sql, binds) = if terms.is_empty() {
                (
                    format!(
                        "SELECT c0 AS id, c1 AS content, c3 AS entityType, c7 AS documentId \
                         FROM {table} WHERE c3 = 'document' ORDER BY c0 DESC LIMIT ?"
                    ),
                    Vec::new(),
                )
            } else {
                let conditions = vec!["c1 LIKE ? ESCAPE '\\'"; terms.len()].join(" AND ");
                (
                    format!(
                        "SELECT c0 AS id, c1 AS content, c3 AS entityType, c7 AS documentId \
                         FROM {table} WHERE {conditions} LIMIT ?"
                    ),
                    terms
                        .iter()
                        .map(|t| format!("%{}%", escape_like(t)))
                        .collect(),
                )
            };

            match fetch_all_cancellable(&sql, binds, limit, space, cancel).await {
                Ok(rows) => {
                    return rows
                        .iter()
                        .map(|row| block_from_row(&space.id, row))
                        .collect();
                }
                Err(QueryFailure::Cancelled) => return Err(Error::Cancelled),
                Err(QueryFailure::Backend(e)) => {
                    debug!(space_id = %space.id, table, error = %e, "fallback table variant failed");
                    last_err = Some(e);
                }
            }
        }

        // Unreachable only if FALLBACK_TABLES were empty.
        Err(match last_err {
            Some(e) => Error::query("query", e),
            None => Error::Search("no fallback tables configured".to_string()),
        })
    }

    /// Query one space, degrading to the fallback scan exactly once when
    /// the full-text capability is absent.
    async fn space_blocks(
        &self,
        space: &Space,
        terms: &[String],
        expr: &str,
        limit: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>> {
        match self.fulltext_rows(space, expr, limit, cancel).await {
            Ok(rows) => rows
                .iter()
                .map(|row| block_from_row(&space.id, row))
                .collect(),
            Err(QueryFailure::Cancelled) => Err(Error::Cancelled),
            Err(QueryFailure::Backend(e)) if is_fulltext_unavailable(&e) => {
                warn!(space_id = %space.id, error = %e, "full-text unavailable, using substring scan");
                self.fallback_blocks(space, terms, limit, cancel).await
            }
            Err(QueryFailure::Backend(e)) => Err(Error::query("query", e)),
        }
    }
}

#[async_trait]
impl BlockSource for BlockRepo {
    #[instrument(skip(self, cancel), fields(term_count = req.terms.len()))]
    async fn fetch_blocks(
        &self,
        req: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Block>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let scope = self.spaces_in_scope(req.all_spaces, req.primary_space.as_deref());
        let expr = build_match_expression(&req.terms);
        let limit = if req.terms.is_empty() {
            self.config().result_limit as i64
        } else {
            self.config().fetch_limit
        };

        let mut blocks: Vec<Block> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for space in scope {
            if blocks.len() as i64 >= self.config().fetch_limit {
                debug!(space_id = %space.id, "fetch buffer full, skipping remaining spaces");
                break;
            }

            let space_blocks = self
                .space_blocks(space, &req.terms, &expr, limit, cancel)
                .await?;

            for block in space_blocks {
                if seen.insert((block.space_id.clone(), block.id.clone())) {
                    blocks.push(block);
                }
            }
        }

        debug!(result_count = blocks.len(), "aggregated candidate blocks");
        Ok(blocks)
    }

    async fn resolve_document_names(
        &self,
        blocks: &[Block],
        cancel: &CancellationToken,
    ) -> Result<std::collections::HashMap<DocKey, String>> {
        self.document_names_for(blocks, cancel).await
    }
}

//! Parent-document name resolution for fragment results.
//!
//! Fragments display their parent document's title as a subtitle. Parent
//! contents are fetched in one batched query per owning space against the
//! index's shadow content table, which is readable whether or not the FTS5
//! module can be loaded.

use std::collections::{HashMap, HashSet};

use sqlx::Row;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use blockdex_core::defaults::FALLBACK_TABLES;
use blockdex_core::{Block, DocKey, Error, Result};

use crate::search::{fetch_all_cancellable, QueryFailure};
use crate::space::BlockRepo;

impl BlockRepo {
    /// Resolve parent-document contents for the fragments among `blocks`.
    ///
    /// Documents need no lookup; fragments are grouped by owning space and
    /// resolved with one `IN (...)` query each. Missing parents simply stay
    /// absent from the returned map.
    pub(crate) async fn document_names_for(
        &self,
        blocks: &[Block],
        cancel: &CancellationToken,
    ) -> Result<HashMap<DocKey, String>> {
        let mut names = HashMap::new();
        if blocks.is_empty() {
            return Ok(names);
        }

        let mut ids_by_space: HashMap<&str, HashSet<&str>> = HashMap::new();
        for block in blocks {
            if block.is_document() || block.document_id.is_empty() {
                continue;
            }
            ids_by_space
                .entry(block.space_id.as_str())
                .or_default()
                .insert(block.document_id.as_str());
        }

        for space in self.spaces() {
            let Some(ids) = ids_by_space.get(space.id.as_str()) else {
                continue;
            };

            let binds: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            let placeholders = vec!["?"; binds.len()].join(", ");

            let mut last_err: Option<sqlx::Error> = None;
            let mut resolved = false;

            for table in FALLBACK_TABLES {
                let sql = format!(
                    "SELECT c7 AS documentId, c1 AS content FROM {table} \
                     WHERE c3 = 'document' AND c7 IN ({placeholders}) LIMIT ?"
                );

                match fetch_all_cancellable(&sql, binds.clone(), binds.len() as i64, space, cancel)
                    .await
                {
                    Ok(rows) => {
                        for row in &rows {
                            let document_id: String = row
                                .try_get("documentId")
                                .map_err(|e| Error::query("scan row", e))?;
                            let content: String = row
                                .try_get("content")
                                .map_err(|e| Error::query("scan row", e))?;
                            names.insert(DocKey::new(space.id.clone(), document_id), content);
                        }
                        resolved = true;
                        break;
                    }
                    Err(QueryFailure::Cancelled) => return Err(Error::Cancelled),
                    Err(QueryFailure::Backend(e)) => {
                        debug!(space_id = %space.id, table, error = %e, "backfill table variant failed");
                        last_err = Some(e);
                    }
                }
            }

            if !resolved {
                return Err(match last_err {
                    Some(e) => Error::query("query", e),
                    None => Error::Search("no fallback tables configured".to_string()),
                });
            }
        }

        debug!(resolved_count = names.len(), "resolved parent document names");
        Ok(names)
    }
}

//! Result post-processing: daily-note suppression, capping, and parent
//! title labels.

use std::collections::HashMap;

use tracing::debug;

use blockdex_core::defaults::{BLOCK_LABEL_PREFIX, DOCUMENT_LABEL};
use blockdex_core::{is_date_title, Block, DocKey};

/// Drop date-titled documents and cap the result list.
///
/// Unless `include_daily` is set, a document whose content is exactly a
/// `YYYY.MM.DD` title is suppressed; fragments are never suppressed by
/// this rule. The list is truncated to `limit` records, order preserved.
pub fn filter_date_titles(blocks: Vec<Block>, include_daily: bool, limit: usize) -> Vec<Block> {
    let mut filtered = Vec::with_capacity(limit.min(blocks.len()));

    for block in blocks {
        if !include_daily && block.is_document() && is_date_title(&block.content) {
            continue;
        }
        filtered.push(block);

        if filtered.len() >= limit {
            break;
        }
    }

    debug!(result_count = filtered.len(), include_daily, "filtered results");
    filtered
}

/// Attach synthesized display labels, operating on a copy.
///
/// Documents are labelled `"[Document]"`; fragments get `"[Block] "`
/// followed by the resolved parent content, or just the prefix when the
/// lookup missed.
pub fn backfill_document_names(blocks: &[Block], names: &HashMap<DocKey, String>) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| {
            let mut labelled = block.clone();
            labelled.document_name = Some(if block.is_document() {
                DOCUMENT_LABEL.to_string()
            } else {
                let parent = names
                    .get(&DocKey::new(block.space_id.clone(), block.document_id.clone()))
                    .map(String::as_str)
                    .unwrap_or_default();
                format!("{BLOCK_LABEL_PREFIX}{parent}")
            });
            labelled
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdex_core::EntityKind;

    fn block(id: &str, content: &str, kind: EntityKind, document_id: &str) -> Block {
        Block {
            id: id.to_string(),
            space_id: "s1".to_string(),
            content: content.to_string(),
            entity_kind: kind,
            document_id: document_id.to_string(),
            document_name: None,
        }
    }

    #[test]
    fn test_daily_documents_suppressed_by_default() {
        let filtered = filter_date_titles(
            vec![
                block("d1", "2024.03.01", EntityKind::Document, ""),
                block("d2", "Project Plan", EntityKind::Document, ""),
            ],
            false,
            40,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "d2");
    }

    #[test]
    fn test_daily_documents_kept_when_requested() {
        let filtered = filter_date_titles(
            vec![
                block("d1", "2024.03.01", EntityKind::Document, ""),
                block("d2", "Project Plan", EntityKind::Document, ""),
            ],
            true,
            40,
        );
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_date_titled_fragments_are_never_suppressed() {
        let filtered = filter_date_titles(
            vec![block("b1", "2024.03.01", EntityKind::Fragment, "d1")],
            false,
            40,
        );
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_cap_preserves_order() {
        let blocks: Vec<Block> = (0..50)
            .map(|i| block(&format!("d{i}"), "note", EntityKind::Document, ""))
            .collect();
        let filtered = filter_date_titles(blocks, false, 40);
        assert_eq!(filtered.len(), 40);
        assert_eq!(filtered[0].id, "d0");
        assert_eq!(filtered[39].id, "d39");
    }

    #[test]
    fn test_backfill_labels_documents_and_fragments() {
        let blocks = vec![
            block("d1", "Parent", EntityKind::Document, ""),
            block("b1", "child", EntityKind::Fragment, "d1"),
        ];
        let mut names = HashMap::new();
        names.insert(DocKey::new("s1", "d1"), "Parent".to_string());

        let labelled = backfill_document_names(&blocks, &names);
        assert_eq!(labelled[0].document_name.as_deref(), Some("[Document]"));
        assert_eq!(labelled[1].document_name.as_deref(), Some("[Block] Parent"));
    }

    #[test]
    fn test_backfill_lookup_miss_yields_empty_parent() {
        let blocks = vec![block("b1", "child", EntityKind::Fragment, "gone")];
        let labelled = backfill_document_names(&blocks, &HashMap::new());
        assert_eq!(labelled[0].document_name.as_deref(), Some("[Block] "));
    }

    #[test]
    fn test_backfill_does_not_mutate_input() {
        let blocks = vec![block("d1", "Parent", EntityKind::Document, "")];
        let _ = backfill_document_names(&blocks, &HashMap::new());
        assert!(blocks[0].document_name.is_none());
    }
}

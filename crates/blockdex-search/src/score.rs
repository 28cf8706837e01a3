//! Match-quality scoring and deterministic ranking.
//!
//! The backends blend exact, prefix, and scattered-word matches into one
//! candidate list, so every aggregated block is re-scored here against the
//! original phrase and re-ranked with a stable multi-key comparator.

use std::cmp::Ordering;

use tracing::debug;

use blockdex_core::{contains_all_words, contains_ordered_words, Block};

/// Transient match-quality classification for one block.
///
/// Computed at scoring time, discarded after the sort.
#[derive(Debug, Clone, Copy)]
pub struct MatchScore {
    /// Content contains the full joined search phrase.
    pub exact_match: bool,
    /// Content contains every word in input order (not necessarily
    /// contiguous).
    pub ordered_words_match: bool,
    /// Content contains every word somewhere.
    pub all_words_match: bool,
    /// Block is a top-level document.
    pub is_document: bool,
    /// Retrieval position, the ultimate stable tie-break.
    pub original_index: usize,
}

fn score_block(block: &Block, phrase: &str, words: &[String], index: usize) -> MatchScore {
    let content = block.content.to_lowercase();
    let exact_match = content.contains(phrase);

    let (ordered_words_match, all_words_match) = if words.len() > 1 {
        (
            contains_ordered_words(&content, words),
            contains_all_words(&content, words),
        )
    } else {
        // Single-word search: the three classifications collapse.
        (exact_match, exact_match)
    };

    MatchScore {
        exact_match,
        ordered_words_match,
        all_words_match,
        is_document: block.is_document(),
        original_index: index,
    }
}

/// The ranking cascade. Earlier keys win; within an equal match tier a
/// document outranks a fragment only when both actually hold that tier.
/// Retrieval order is the final tie-break, so the sort is a total order
/// and observably stable.
fn rank_cmp(a: &MatchScore, b: &MatchScore) -> Ordering {
    if a.exact_match != b.exact_match {
        return b.exact_match.cmp(&a.exact_match);
    }
    if a.exact_match && a.is_document != b.is_document {
        return b.is_document.cmp(&a.is_document);
    }

    if a.ordered_words_match != b.ordered_words_match {
        return b.ordered_words_match.cmp(&a.ordered_words_match);
    }
    if a.ordered_words_match && a.is_document != b.is_document {
        return b.is_document.cmp(&a.is_document);
    }

    if a.all_words_match != b.all_words_match {
        return b.all_words_match.cmp(&a.all_words_match);
    }
    if a.all_words_match && a.is_document != b.is_document {
        return b.is_document.cmp(&a.is_document);
    }

    if a.is_document != b.is_document {
        return b.is_document.cmp(&a.is_document);
    }

    a.original_index.cmp(&b.original_index)
}

/// Score, filter, and rank aggregated blocks.
///
/// For multi-word searches, blocks that do not contain every word are
/// dropped entirely. Remaining blocks are sorted by the ranking cascade;
/// ties keep their backend retrieval order.
pub fn rank_blocks(blocks: Vec<Block>, terms: &[String]) -> Vec<Block> {
    if terms.is_empty() {
        return blocks;
    }

    let phrase = terms.join(" ").to_lowercase();
    let words: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    let multi_word = words.len() > 1;

    let mut scored: Vec<(MatchScore, Block)> = blocks
        .into_iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let score = score_block(&block, &phrase, &words, index);
            if multi_word && !score.all_words_match {
                return None;
            }
            Some((score, block))
        })
        .collect();

    scored.sort_by(|(a, _), (b, _)| rank_cmp(a, b));
    debug!(result_count = scored.len(), "ranked candidate blocks");

    scored.into_iter().map(|(_, block)| block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdex_core::EntityKind;

    fn block(id: &str, content: &str, kind: EntityKind) -> Block {
        Block {
            id: id.to_string(),
            space_id: "s1".to_string(),
            content: content.to_string(),
            entity_kind: kind,
            document_id: if kind == EntityKind::Document {
                String::new()
            } else {
                "parent".to_string()
            },
            document_name: None,
        }
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_exact_match_outranks_scattered_words() {
        let ranked = rank_blocks(
            vec![
                block("scattered", "todo and then my thing", EntityKind::Document),
                block("exact", "my todo list", EntityKind::Document),
            ],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ids(&ranked), vec!["exact", "scattered"]);
    }

    #[test]
    fn test_document_outranks_fragment_within_tier() {
        let ranked = rank_blocks(
            vec![
                block("frag", "my todo list", EntityKind::Fragment),
                block("doc", "my todo list", EntityKind::Document),
            ],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ids(&ranked), vec!["doc", "frag"]);
    }

    #[test]
    fn test_ordered_words_outrank_unordered() {
        let ranked = rank_blocks(
            vec![
                block("unordered", "todo for my day", EntityKind::Document),
                block("ordered", "my daily todo", EntityKind::Document),
            ],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ids(&ranked), vec!["ordered", "unordered"]);
    }

    #[test]
    fn test_multi_word_filter_drops_partial_matches() {
        let ranked = rank_blocks(
            vec![
                block("both", "alpha and zeta", EntityKind::Document),
                block("partial", "alpha only", EntityKind::Document),
            ],
            &terms(&["alpha", "zeta"]),
        );
        assert_eq!(ids(&ranked), vec!["both"]);
    }

    #[test]
    fn test_single_word_partial_matches_survive() {
        // Single-word searches keep backend candidates even when the word
        // only matched via prefix expansion.
        let ranked = rank_blocks(
            vec![
                block("prefix", "todoist import", EntityKind::Document),
                block("exact", "todo list", EntityKind::Document),
            ],
            &terms(&["todo"]),
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "prefix"); // "todoist" contains "todo"
    }

    #[test]
    fn test_tied_scores_keep_retrieval_order() {
        let ranked = rank_blocks(
            vec![
                block("first", "my todo a", EntityKind::Document),
                block("second", "my todo b", EntityKind::Document),
                block("third", "my todo c", EntityKind::Document),
            ],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        let ranked = rank_blocks(
            vec![block("doc", "My TODO List", EntityKind::Document)],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_kind_tiebreak_applies_only_within_held_tier() {
        // A fragment with an exact match must outrank a document that only
        // contains the words scattered.
        let ranked = rank_blocks(
            vec![
                block("doc", "todo comes before my here", EntityKind::Document),
                block("frag", "my todo", EntityKind::Fragment),
            ],
            &terms(&["my", "todo"]),
        );
        assert_eq!(ids(&ranked), vec!["frag", "doc"]);
    }

    #[test]
    fn test_empty_terms_pass_through_unranked() {
        let blocks = vec![
            block("b", "beta", EntityKind::Fragment),
            block("a", "alpha", EntityKind::Document),
        ];
        let ranked = rank_blocks(blocks.clone(), &[]);
        assert_eq!(ranked, blocks);
    }
}

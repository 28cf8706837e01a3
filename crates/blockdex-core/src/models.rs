//! Shared data model for search results.

use serde::{Deserialize, Serialize};

use crate::defaults::ENTITY_TYPE_DOCUMENT;

/// Kind of a matched unit: a top-level document or a sub-document fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A top-level note; has no parent.
    Document,
    /// A block of content inside a document (text, todo, code, ...).
    Fragment,
}

impl EntityKind {
    /// Map a raw `entityType` column value onto a kind.
    ///
    /// The index stores many block type strings; everything that is not a
    /// document is a fragment for ranking purposes.
    pub fn from_raw(raw: &str) -> Self {
        if raw == ENTITY_TYPE_DOCUMENT {
            EntityKind::Document
        } else {
            EntityKind::Fragment
        }
    }
}

/// One matched unit from a space's search index.
///
/// Built by the executor from backend rows. The post-processor's title
/// backfill enriches a copy, never the original. A document block has an
/// empty `document_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier, unique within the owning space.
    pub id: String,
    /// Owning space identifier.
    pub space_id: String,
    /// Raw title/text content.
    pub content: String,
    /// Document or fragment.
    pub entity_kind: EntityKind,
    /// Parent document identifier; empty for documents.
    pub document_id: String,
    /// Resolved parent display label, filled by backfill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
}

impl Block {
    /// Whether this block is a top-level document.
    pub fn is_document(&self) -> bool {
        self.entity_kind == EntityKind::Document
    }
}

/// Hash key identifying a parent document across spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocKey {
    pub space_id: String,
    pub document_id: String,
}

impl DocKey {
    pub fn new(space_id: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            document_id: document_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_raw_document() {
        assert_eq!(EntityKind::from_raw("document"), EntityKind::Document);
    }

    #[test]
    fn test_entity_kind_from_raw_other_types_are_fragments() {
        for raw in ["text", "todo", "code", "", "DOCUMENT"] {
            assert_eq!(EntityKind::from_raw(raw), EntityKind::Fragment);
        }
    }

    #[test]
    fn test_block_is_document() {
        let block = Block {
            id: "d1".to_string(),
            space_id: "s1".to_string(),
            content: "Project Plan".to_string(),
            entity_kind: EntityKind::Document,
            document_id: String::new(),
            document_name: None,
        };
        assert!(block.is_document());
    }

    #[test]
    fn test_block_serializes_without_unresolved_name() {
        let block = Block {
            id: "b1".to_string(),
            space_id: "s1".to_string(),
            content: "a line".to_string(),
            entity_kind: EntityKind::Fragment,
            document_id: "d1".to_string(),
            document_name: None,
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(!json.contains("document_name"));
        assert!(json.contains("\"fragment\""));
    }
}

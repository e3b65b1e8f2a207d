//! Data types for documents and their segments.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Text indexed when the user supplies no résumé.
pub const FALLBACK_TEXT: &str = "Experienced professional with a background in strategy, \
                                 marketing, and AI-driven content development.";

/// A source document: raw text plus an identifier.
///
/// The identifier is what the [`IndexStore`](crate::IndexStore) memoizes on,
/// so two documents with the same id are treated as the same index input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Optional label describing where the text came from (file path, "fallback").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    /// Create a document whose id is the SHA-256 digest of its text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let id = content_id(&text);
        Self { id, text, source: None }
    }

    /// Create a document with an explicit id.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), source: None }
    }

    /// The built-in fallback document.
    pub fn fallback() -> Self {
        Self::from_text(FALLBACK_TEXT).with_source("fallback")
    }

    /// Attach a source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the document has no text to index.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn content_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    format!("doc-{}", &hash[..16])
}

/// A bounded slice of a [`Document`], the unit of embedding and retrieval.
///
/// `offset` counts Unicode scalar values from the start of the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    /// Unique identifier, `{document_id}_{ordinal}`.
    pub id: String,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Position of this segment in the chunked sequence.
    pub ordinal: usize,
    /// Char offset of the segment start within the document text.
    pub offset: usize,
    /// The text content of the segment.
    pub text: String,
}

impl Segment {
    /// Length of the segment in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_ids_are_stable_and_distinct() {
        let a = Document::from_text("Product manager, 8 years");
        let b = Document::from_text("Product manager, 8 years");
        let c = Document::from_text("Data analyst");
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert!(a.id.starts_with("doc-"));
    }

    #[test]
    fn fallback_is_not_empty() {
        let doc = Document::fallback();
        assert!(!doc.is_empty());
        assert_eq!(doc.source.as_deref(), Some("fallback"));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        assert!(Document::from_text(" \n\t ").is_empty());
    }
}

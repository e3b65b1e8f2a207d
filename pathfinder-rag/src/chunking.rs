//! Fixed-size document chunking.
//!
//! Segments are measured in chars rather than bytes so that multi-byte text
//! (accented names, bullets copied from PDFs) is never cut inside a code point.

use crate::config::validate_chunking;
use crate::document::{Document, Segment};
use crate::error::Result;

/// A strategy for splitting documents into segments.
///
/// Implementations produce [`Segment`]s only; embeddings are attached later
/// by the [`IndexBuilder`](crate::IndexBuilder).
pub trait Chunker: Send + Sync {
    /// Split a document into segments.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn chunk(&self, document: &Document) -> Vec<Segment>;
}

/// Splits text into fixed-size segments with configurable overlap.
///
/// Each step advances the start by `chunk_size - chunk_overlap`. The last
/// segment may be shorter than `chunk_size`; nothing is dropped.
///
/// # Example
///
/// ```rust,ignore
/// use pathfinder_rag::{Chunker, FixedSizeChunker};
///
/// let chunker = FixedSizeChunker::new(300, 50)?;
/// let segments = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidConfiguration`](crate::RagError::InvalidConfiguration)
    /// unless `chunk_size > 0` and `chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_chunking(chunk_size, chunk_overlap)?;
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Target segment length in chars.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap between neighbouring segments in chars.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Char ranges `[start, end)` of every segment for a text of `total` chars.
    fn spans(&self, total: usize) -> Vec<(usize, usize)> {
        let step = self.chunk_size - self.chunk_overlap;
        let mut spans = Vec::new();
        let mut start = 0;

        while start < total {
            let end = (start + self.chunk_size).min(total);
            spans.push((start, end));
            if end == total {
                break;
            }
            start += step;
        }

        spans
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Segment> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = document.text.chars().collect();

        self.spans(chars.len())
            .into_iter()
            .enumerate()
            .map(|(ordinal, (start, end))| Segment {
                id: format!("{}_{ordinal}", document.id),
                document_id: document.id.clone(),
                ordinal,
                offset: start,
                text: chars[start..end].iter().collect(),
            })
            .collect()
    }
}

/// Split `text` into overlapping segments.
///
/// Convenience wrapper over [`FixedSizeChunker`] for callers that have a bare
/// string; segments are attributed to a document whose id is derived from
/// the text.
pub fn split(text: &str, chunk_size: usize, chunk_overlap: usize) -> Result<Vec<Segment>> {
    let chunker = FixedSizeChunker::new(chunk_size, chunk_overlap)?;
    Ok(chunker.chunk(&Document::from_text(text)))
}

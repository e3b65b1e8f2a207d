//! Index construction: chunk → embed → index, or load from storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathfinder_rag::{Document, IndexBuilder, MockEmbeddingProvider, RagConfig};
//!
//! let builder = IndexBuilder::new(Arc::new(MockEmbeddingProvider::new(64)), RagConfig::default());
//! let index = builder.build(&Document::from_text(resume_text)).await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::{Chunker, FixedSizeChunker};
use crate::config::RagConfig;
use crate::document::{Document, FALLBACK_TEXT};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::SimilarityIndex;

/// Builds a [`SimilarityIndex`] from a raw document.
///
/// Construction costs one embedding round trip per document, so callers
/// should build at most once per distinct document; the
/// [`IndexStore`](crate::IndexStore) takes care of that.
pub struct IndexBuilder {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl IndexBuilder {
    /// Create a builder around an embedding provider.
    pub fn new(embedding_provider: Arc<dyn EmbeddingProvider>, config: RagConfig) -> Self {
        Self { config, embedding_provider }
    }

    /// Return a reference to the builder configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Build using the configured chunk size and overlap.
    pub async fn build(&self, document: &Document) -> Result<SimilarityIndex> {
        self.build_from_document(document, self.config.chunk_size, self.config.chunk_overlap).await
    }

    /// Chunk, embed, and index `document`.
    ///
    /// Empty document text is replaced by [`FALLBACK_TEXT`] so the index never
    /// ends up with zero segments. Chunk parameters are validated before any
    /// network call.
    ///
    /// # Errors
    ///
    /// - [`RagError::InvalidConfiguration`](crate::RagError::InvalidConfiguration) for bad chunk parameters.
    /// - [`RagError::EmbeddingService`](crate::RagError::EmbeddingService) if embedding fails.
    /// - [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch) if the provider returns ragged vectors.
    pub async fn build_from_document(
        &self,
        document: &Document,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<SimilarityIndex> {
        let chunker = FixedSizeChunker::new(chunk_size, chunk_overlap)?;

        let substituted;
        let document = if document.is_empty() {
            info!(document.id = %document.id, "document is empty, indexing fallback text");
            substituted = Document::with_id(document.id.clone(), FALLBACK_TEXT)
                .with_source("fallback");
            &substituted
        } else {
            document
        };

        // 1. Chunk the document
        let segments = chunker.chunk(document);

        // 2. Embed all segment texts in one batch
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        let vectors = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during index build");
            e
        })?;

        // 3. Pair segments with vectors
        let index = SimilarityIndex::build(segments, vectors, self.config.metric)?;

        info!(document.id = %document.id, chunk_count = index.len(), "indexed document");
        Ok(index)
    }

    /// Load a prebuilt index instead of chunking and embedding.
    pub async fn load_from_storage(&self, location: impl AsRef<Path>) -> Result<SimilarityIndex> {
        SimilarityIndex::load(location).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RagError;
    use crate::mock::MockEmbeddingProvider;

    fn builder(provider: MockEmbeddingProvider) -> IndexBuilder {
        IndexBuilder::new(Arc::new(provider), RagConfig::default())
    }

    #[tokio::test]
    async fn empty_document_indexes_fallback() {
        let index = builder(MockEmbeddingProvider::new(16))
            .build(&Document::with_id("blank", ""))
            .await
            .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].segment.text, FALLBACK_TEXT);
        assert_eq!(index.entries()[0].segment.document_id, "blank");
    }

    #[tokio::test]
    async fn bad_chunk_parameters_fail_before_embedding() {
        let provider = Arc::new(MockEmbeddingProvider::new(16));
        let builder = IndexBuilder::new(provider.clone(), RagConfig::default());
        let err = builder
            .build_from_document(&Document::from_text("text"), 10, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::InvalidConfiguration(_)));
        assert_eq!(provider.embedded_count(), 0);
    }

    #[tokio::test]
    async fn embedding_failure_propagates() {
        let err = builder(MockEmbeddingProvider::failing(16))
            .build(&Document::from_text("Ten years in supply chain operations."))
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::EmbeddingService { .. }));
    }
}

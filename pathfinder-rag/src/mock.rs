//! Deterministic embedding provider for tests and offline runs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Hash-based embeddings: the same text always maps to the same unit vector.
///
/// Counts every text it embeds so callers can assert on memoization, and can
/// be switched into a failing mode to simulate an unreachable service.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
    fail: AtomicBool,
    embedded: AtomicUsize,
}

impl MockEmbeddingProvider {
    /// Create a provider producing vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, fail: AtomicBool::new(false), embedded: AtomicUsize::new(0) }
    }

    /// A provider whose every call fails with a network-style error.
    pub fn failing(dimensions: usize) -> Self {
        let provider = Self::new(dimensions);
        provider.set_failing(true);
        provider
    }

    /// Switch failure mode on or off for subsequent calls.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Number of texts embedded so far (failed calls excluded).
    pub fn embedded_count(&self) -> usize {
        self.embedded.load(Ordering::SeqCst)
    }

    /// The vector this provider assigns to `text`, without counting a call.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        emb
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RagError::EmbeddingService {
                provider: "Mock".into(),
                message: "connection refused".into(),
            });
        }
        self.embedded.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_text_same_vector() {
        let provider = MockEmbeddingProvider::new(8);
        let a = provider.embed("strategy").await.unwrap();
        let b = provider.embed("strategy").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert_eq!(provider.embedded_count(), 2);
    }

    #[tokio::test]
    async fn failing_provider_reports_service_error() {
        let provider = MockEmbeddingProvider::failing(8);
        let err = provider.embed_batch(&["a", "b"]).await.unwrap_err();
        assert!(matches!(err, RagError::EmbeddingService { .. }));
        assert_eq!(provider.embedded_count(), 0);
    }
}

//! The seam between résumé text and vectors.
//!
//! Résumé segments are embedded once when an index is built, through
//! [`EmbeddingProvider::embed_batch`]. Each question asked of the résumé is
//! embedded on its own through [`EmbeddingProvider::embed`]. Both sides must
//! come from the same provider, or distances between them mean nothing.
//!
//! ```
//! use pathfinder_rag::{EmbeddingProvider, MockEmbeddingProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> pathfinder_rag::Result<()> {
//! let provider = MockEmbeddingProvider::new(16);
//!
//! let segments = ["Led a team of five analysts.", "Migrated reporting to the cloud."];
//! let vectors = provider.embed_batch(&segments).await?;
//! assert_eq!(vectors.len(), segments.len());
//!
//! let question = provider.embed("What leadership experience do I have?").await?;
//! assert_eq!(question.len(), provider.dimensions());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;

/// Turns résumé segments and questions into vectors of a fixed width.
///
/// Providers hold no state between calls and never retry; a failure surfaces
/// as [`RagError::EmbeddingService`](crate::RagError::EmbeddingService) and the
/// caller decides whether the stage is lost.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one question (or any single text).
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed the segments of a résumé, one vector per segment, in order.
    ///
    /// Falls back to one [`embed`](EmbeddingProvider::embed) call per segment
    /// and stops at the first failure. Services with a batch endpoint override
    /// this.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Width of every vector this provider returns.
    fn dimensions(&self) -> usize;
}

//! Free-text retrieval against a built index.

use tracing::debug;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::SimilarityIndex;

/// Embed `query_text` and return the text of the `k` nearest segments.
///
/// Empty queries are not special-cased: they are embedded like any other
/// text and return whatever lies nearest to that embedding. Embedding and
/// dimension errors are returned as-is.
pub async fn retrieve(
    index: &SimilarityIndex,
    embedding_provider: &dyn EmbeddingProvider,
    query_text: &str,
    k: usize,
) -> Result<Vec<String>> {
    let query_vector = embedding_provider.embed(query_text).await?;
    let segments = index.query(&query_vector, k)?;

    debug!(query_len = query_text.len(), k, result_count = segments.len(), "retrieval completed");
    Ok(segments.into_iter().map(|s| s.text).collect())
}

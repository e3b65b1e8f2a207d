//! Long-lived holder of the process-wide index.
//!
//! [`IndexStore`] is constructed once at startup and handed to whoever needs
//! retrieval (usually behind an `Arc`). It memoizes the built index by
//! document identity and exposes explicit rebuild, load, and clear entry
//! points. A failed build or load never replaces what is cached.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::builder::IndexBuilder;
use crate::document::Document;
use crate::error::{RagError, Result};
use crate::index::SimilarityIndex;
use crate::retrieval::retrieve;

/// Where the cached index came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOrigin {
    /// Built from the document with this id.
    Document(String),
    /// Loaded from a persisted file.
    Storage(PathBuf),
}

#[derive(Debug)]
struct Cached {
    origin: IndexOrigin,
    index: Arc<SimilarityIndex>,
}

/// Shared, explicitly managed index cache.
pub struct IndexStore {
    builder: IndexBuilder,
    cached: RwLock<Option<Cached>>,
}

impl IndexStore {
    /// Create an empty store that builds with `builder`.
    pub fn new(builder: IndexBuilder) -> Self {
        Self { builder, cached: RwLock::new(None) }
    }

    /// The builder used for (re)builds and queries.
    pub fn builder(&self) -> &IndexBuilder {
        &self.builder
    }

    /// The cached index, if one has been built or loaded.
    pub async fn current(&self) -> Option<Arc<SimilarityIndex>> {
        self.cached.read().await.as_ref().map(|c| Arc::clone(&c.index))
    }

    /// Where the cached index came from.
    pub async fn origin(&self) -> Option<IndexOrigin> {
        self.cached.read().await.as_ref().map(|c| c.origin.clone())
    }

    /// Return the index for `document`, building it only if the cache holds
    /// a different document (or nothing).
    pub async fn ensure(&self, document: &Document) -> Result<Arc<SimilarityIndex>> {
        let wanted = IndexOrigin::Document(document.id.clone());
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.origin == wanted {
                debug!(document.id = %document.id, "index cache hit");
                return Ok(Arc::clone(&cached.index));
            }
        }

        let mut slot = self.cached.write().await;
        if let Some(cached) = slot.as_ref() {
            if cached.origin == wanted {
                return Ok(Arc::clone(&cached.index));
            }
        }

        let index = Arc::new(self.builder.build(document).await?);
        *slot = Some(Cached { origin: wanted, index: Arc::clone(&index) });
        Ok(index)
    }

    /// Build `document` unconditionally and replace the cache on success.
    pub async fn rebuild(&self, document: &Document) -> Result<Arc<SimilarityIndex>> {
        let mut slot = self.cached.write().await;
        let index = Arc::new(self.builder.build(document).await?);
        info!(document.id = %document.id, "rebuilt index");
        *slot = Some(Cached {
            origin: IndexOrigin::Document(document.id.clone()),
            index: Arc::clone(&index),
        });
        Ok(index)
    }

    /// Replace the cache with an index loaded from `location`.
    pub async fn load(&self, location: impl AsRef<Path>) -> Result<Arc<SimilarityIndex>> {
        let location = location.as_ref();
        let mut slot = self.cached.write().await;
        let index = Arc::new(self.builder.load_from_storage(location).await?);
        *slot = Some(Cached {
            origin: IndexOrigin::Storage(location.to_path_buf()),
            index: Arc::clone(&index),
        });
        Ok(index)
    }

    /// Drop the cached index; the next [`ensure`](Self::ensure) rebuilds.
    pub async fn clear(&self) {
        self.cached.write().await.take();
        debug!("index cache cleared");
    }

    /// Retrieve the `k` nearest segment texts from the cached index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexUnavailable`] when nothing has been built or
    /// loaded; otherwise the errors of [`retrieve`].
    pub async fn retrieve(&self, query_text: &str, k: usize) -> Result<Vec<String>> {
        let index = self.current().await.ok_or(RagError::IndexUnavailable)?;
        retrieve(&index, self.builder.embedding_provider().as_ref(), query_text, k).await
    }
}

//! Error types for the `pathfinder-rag` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, loading, or querying an index.
#[derive(Debug, Error)]
pub enum RagError {
    /// Chunking parameters or pipeline settings are inconsistent.
    ///
    /// Raised before any network call is made.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The embedding service failed, rejected the request, or returned a
    /// malformed response.
    #[error("Embedding service error ({provider}): {message}")]
    EmbeddingService {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector's length disagrees with the index dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension the index was built with.
        expected: usize,
        /// The offending vector's dimension.
        actual: usize,
    },

    /// A persisted index exists but could not be decoded.
    #[error("Corrupt index at {}: {message}", path.display())]
    CorruptIndex {
        /// Location of the persisted index.
        path: PathBuf,
        /// What made the file unreadable.
        message: String,
    },

    /// No persisted index exists at the given location.
    #[error("Index not found at {}", path.display())]
    NotFound {
        /// The location that was looked up.
        path: PathBuf,
    },

    /// A query was issued before any index was built or loaded.
    #[error("No index is available; build or load one first")]
    IndexUnavailable,

    /// Filesystem failure while persisting an index.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being written or read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;

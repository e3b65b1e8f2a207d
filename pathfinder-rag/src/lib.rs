//! # pathfinder-rag
//!
//! Retrieval over a single résumé: split it into overlapping segments, embed
//! them, keep them in an exact nearest-neighbour index, and answer free-text
//! queries with the most similar segments.
//!
//! ## Overview
//!
//! - [`FixedSizeChunker`] / [`split`] — overlapping fixed-size segments
//! - [`EmbeddingProvider`] — text → vector, with [`GeminiEmbeddingProvider`]
//!   and [`MockEmbeddingProvider`]
//! - [`SimilarityIndex`] — exact k-NN over segment vectors, persistable as JSON
//! - [`IndexBuilder`] — chunk → embed → index, or load from storage
//! - [`IndexStore`] — the long-lived, memoizing holder of the current index
//! - [`retrieve`] — query text → nearest segment texts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pathfinder_rag::{Document, IndexBuilder, IndexStore, MockEmbeddingProvider, RagConfig};
//!
//! let builder = IndexBuilder::new(Arc::new(MockEmbeddingProvider::new(64)), RagConfig::default());
//! let store = IndexStore::new(builder);
//! store.ensure(&Document::from_text(resume)).await?;
//! let excerpts = store.retrieve("leadership experience", 4).await?;
//! ```

pub mod builder;
pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod gemini;
pub mod index;
pub mod mock;
pub mod retrieval;
pub mod store;

pub use builder::IndexBuilder;
pub use chunking::{Chunker, FixedSizeChunker, split};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Document, FALLBACK_TEXT, Segment};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use gemini::GeminiEmbeddingProvider;
pub use index::{DistanceMetric, IndexEntry, SearchHit, SimilarityIndex};
pub use mock::MockEmbeddingProvider;
pub use retrieval::retrieve;
pub use store::{IndexOrigin, IndexStore};

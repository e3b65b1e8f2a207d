//! Exact nearest-neighbour similarity index.
//!
//! [`SimilarityIndex`] keeps `(segment, vector)` pairs in insertion order and
//! answers queries by brute-force distance ranking. Résumé indexes hold tens to
//! low hundreds of segments, so a linear scan is both exact and fast enough.
//!
//! An index can be persisted to a JSON file and loaded back, which lets a
//! process skip the embedding round trip entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::document::Segment;
use crate::error::{RagError, Result};

/// Version tag written into persisted index files.
const FORMAT_VERSION: u32 = 1;

/// Distance function, fixed when an index is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Sum of squared component differences.
    #[default]
    SquaredEuclidean,
    /// `1 - cosine similarity`; zero-magnitude vectors are at distance 1.
    Cosine,
}

impl DistanceMetric {
    /// Distance between two vectors of equal length. Smaller is closer.
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::SquaredEuclidean => {
                a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
            }
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
        }
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// A stored segment with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// The indexed segment.
    pub segment: Segment,
    /// The segment's embedding.
    pub vector: Vec<f32>,
}

/// A retrieved [`Segment`] paired with its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The retrieved segment.
    pub segment: Segment,
    /// Distance under the index metric (lower is more similar).
    pub distance: f32,
}

/// An immutable collection of embedded segments supporting exact k-NN lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityIndex {
    metric: DistanceMetric,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

#[derive(Serialize)]
struct PersistedIndexRef<'a> {
    format_version: u32,
    metric: DistanceMetric,
    dimension: usize,
    entries: &'a [IndexEntry],
}

#[derive(Deserialize)]
struct PersistedIndex {
    format_version: u32,
    metric: DistanceMetric,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl SimilarityIndex {
    /// Pair each segment with the vector at the same position.
    ///
    /// # Errors
    ///
    /// - [`RagError::DimensionMismatch`] if the vectors disagree in length.
    /// - [`RagError::InvalidConfiguration`] if the two sequences have
    ///   different lengths or the vectors are zero-dimensional.
    pub fn build(
        segments: Vec<Segment>,
        vectors: Vec<Vec<f32>>,
        metric: DistanceMetric,
    ) -> Result<Self> {
        if segments.len() != vectors.len() {
            return Err(RagError::InvalidConfiguration(format!(
                "{} segments cannot be paired with {} vectors",
                segments.len(),
                vectors.len()
            )));
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        if !vectors.is_empty() && dimension == 0 {
            return Err(RagError::InvalidConfiguration(
                "embedding vectors must not be empty".to_string(),
            ));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(RagError::DimensionMismatch { expected: dimension, actual: bad.len() });
        }

        let entries: Vec<IndexEntry> = segments
            .into_iter()
            .zip(vectors)
            .map(|(segment, vector)| IndexEntry { segment, vector })
            .collect();

        debug!(entry_count = entries.len(), dimension, ?metric, "built similarity index");
        Ok(Self { metric, dimension, entries })
    }

    /// The metric this index ranks by.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Length of every stored vector (0 for an empty index).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored segments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no segments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Rank all entries by distance to `query` and keep the closest `k`.
    ///
    /// Ties keep insertion order. `k == 0` yields nothing; `k` larger than the
    /// index yields every entry.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if `query` does not have the
    /// stored dimension.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, self.metric.distance(&entry.vector, query)))
            .collect();

        // Stable total order: equal distances keep insertion order, NaN ranks last.
        ranked.sort_by(|a, b| a.1.is_nan().cmp(&b.1.is_nan()).then(a.1.total_cmp(&b.1)));
        ranked.truncate(k);

        Ok(ranked
            .into_iter()
            .map(|(i, distance)| SearchHit { segment: self.entries[i].segment.clone(), distance })
            .collect())
    }

    /// The `k` segments closest to `query`, nearest first.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<Segment>> {
        Ok(self.search(query, k)?.into_iter().map(|hit| hit.segment).collect())
    }

    /// Persist the index as JSON at `path`.
    ///
    /// The file is written next to its destination and renamed into place so
    /// a crash never leaves a half-written index behind.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let persisted = PersistedIndexRef {
            format_version: FORMAT_VERSION,
            metric: self.metric,
            dimension: self.dimension,
            entries: &self.entries,
        };
        let bytes = serde_json::to_vec(&persisted).map_err(|e| RagError::CorruptIndex {
            path: path.to_path_buf(),
            message: format!("failed to encode index: {e}"),
        })?;

        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, &bytes).await.map_err(|source| RagError::Io {
            path: tmp.clone(),
            source,
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|source| RagError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), entry_count = self.entries.len(), "saved similarity index");
        Ok(())
    }

    /// Load an index previously written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// - [`RagError::NotFound`] if nothing exists at `path`.
    /// - [`RagError::CorruptIndex`] if the file cannot be decoded, carries an
    ///   unknown format version, or its vectors disagree with its dimension.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RagError::NotFound { path: path.to_path_buf() });
            }
            Err(source) => return Err(RagError::Io { path: path.to_path_buf(), source }),
        };

        let corrupt = |message: String| RagError::CorruptIndex { path: path.to_path_buf(), message };

        let persisted: PersistedIndex =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(format!("invalid JSON: {e}")))?;

        if persisted.format_version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                persisted.format_version
            )));
        }
        if !persisted.entries.is_empty() && persisted.dimension == 0 {
            return Err(corrupt("non-empty index declares dimension 0".to_string()));
        }
        if let Some(entry) = persisted.entries.iter().find(|e| e.vector.len() != persisted.dimension)
        {
            warn!(path = %path.display(), segment = %entry.segment.id, "vector dimension disagrees with header");
            return Err(corrupt(format!(
                "segment '{}' has dimension {}, header says {}",
                entry.segment.id,
                entry.vector.len(),
                persisted.dimension
            )));
        }

        info!(path = %path.display(), entry_count = persisted.entries.len(), "loaded similarity index");
        Ok(Self {
            metric: persisted.metric,
            dimension: persisted.dimension,
            entries: persisted.entries,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

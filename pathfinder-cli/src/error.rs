//! Error types for the `pathfinder-cli` crate.

use std::path::PathBuf;

use pathfinder_model::ModelError;
use thiserror::Error;

/// Failures that abort a whole coaching submission.
///
/// Optional stages never produce these; their failures are recorded on the
/// [`Report`](crate::coach::Report) instead.
#[derive(Debug, Error)]
pub enum CoachError {
    /// The résumé summary could not be generated.
    #[error("summary generation failed: {0}")]
    Summary(#[source] ModelError),
}

/// Failures loading a résumé from disk.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("failed to read résumé {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from PDF {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },
}

/// A convenience result type for coaching runs.
pub type Result<T> = std::result::Result<T, CoachError>;

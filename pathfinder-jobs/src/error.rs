//! Error types for the `pathfinder-jobs` crate.

use thiserror::Error;

/// Errors from the job-listing service.
#[derive(Debug, Error)]
pub enum JobSearchError {
    /// The HTTP request could not be completed.
    #[error("Job search request failed: {0}")]
    Request(String),

    /// The service answered with a non-2xx status.
    #[error("Job search returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Job search response could not be decoded: {0}")]
    Decode(String),
}

/// A convenience result type for job searches.
pub type Result<T> = std::result::Result<T, JobSearchError>;

//! Error types for the `pathfinder-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The generation service failed, refused the prompt, or returned no text.
    #[error("Generation service error ({provider}): {message}")]
    GenerationService {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The client was constructed with unusable settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A convenience result type for generation calls.
pub type Result<T> = std::result::Result<T, ModelError>;

//! # pathfinder-model
//!
//! Generative model clients for Pathfinder.
//!
//! - [`TextGenerator`] - the prompt-in, text-out contract
//! - [`GeminiModel`] - Google's Gemini `generateContent` API
//! - [`MockGenerator`] - scripted replies for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pathfinder_model::{GeminiModel, TextGenerator};
//!
//! # async fn run() -> pathfinder_model::Result<()> {
//! let model = GeminiModel::new("api-key")?.with_model("gemini-1.5-pro-002");
//! let text = model.generate("List 5 essential skills for data science.").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gemini;
pub mod generator;
pub mod mock;

pub use error::{ModelError, Result};
pub use gemini::GeminiModel;
pub use generator::{GenerationRequest, GenerationResponse, TextGenerator};
pub use mock::MockGenerator;

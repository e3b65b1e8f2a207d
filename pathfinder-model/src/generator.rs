//! The generation client trait and its request/response types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A prompt plus optional sampling parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The natural-language prompt.
    pub prompt: String,
    /// Sampling temperature; provider default when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens; provider default when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// A request with provider-default parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), ..Self::default() }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token limit.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Generated text for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text.
    pub text: String,
    /// The model that produced it, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

/// A client for an external generative model.
///
/// One request produces one response. Implementations never retry; a
/// [`GenerationService`](crate::ModelError::GenerationService) error is
/// returned to the caller as-is.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// A short name for logs (usually the model id).
    fn name(&self) -> &str;

    /// Send a full request.
    async fn generate_content(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    /// Send a bare prompt and return only the text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_content(&GenerationRequest::new(prompt)).await?.text)
    }
}

//! Scripted text generator for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ModelError, Result};
use crate::generator::{GenerationRequest, GenerationResponse, TextGenerator};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// A [`TextGenerator`] that answers from a script.
///
/// Rules are checked in insertion order; the first whose key is a substring
/// of the prompt decides the reply. Unmatched prompts get the default reply.
/// Every prompt is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let model = MockGenerator::new()
///     .respond_to("essential skills", "- SEO\n- Copywriting")
///     .fail_on("online course", "quota exceeded");
/// ```
#[derive(Debug)]
pub struct MockGenerator {
    rules: Vec<(String, Reply)>,
    default: Reply,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// A generator that answers every prompt with `"mock response"`.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Text("mock response".into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `text` to prompts containing `key`.
    pub fn respond_to(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push((key.into(), Reply::Text(text.into())));
        self
    }

    /// Fail prompts containing `key` with a service error.
    pub fn fail_on(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((key.into(), Reply::Fail(message.into())));
        self
    }

    /// Replace the reply for unmatched prompts.
    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.default = Reply::Text(text.into());
        self
    }

    /// Fail every unmatched prompt.
    pub fn failing_by_default(mut self, message: impl Into<String>) -> Self {
        self.default = Reply::Fail(message.into());
        self
    }

    /// All prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_content(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        let reply = self
            .rules
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default);

        match reply {
            Reply::Text(text) => Ok(GenerationResponse { text: text.clone(), model_version: None }),
            Reply::Fail(message) => Err(ModelError::GenerationService {
                provider: "Mock".into(),
                message: message.clone(),
            }),
        }
    }
}

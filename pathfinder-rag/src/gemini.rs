//! Gemini embedding provider over the Generative Language REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The default embedding model.
pub const DEFAULT_MODEL: &str = "embedding-001";

/// Most requests `batchEmbedContents` accepts in one call.
pub const MAX_BATCH_SIZE: usize = 100;

/// Dimensionality of `embedding-001` vectors.
const DEFAULT_DIMENSIONS: usize = 768;

const PROVIDER: &str = "Gemini";

/// Gemini task type hint sent with each embedding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Text that will be stored and searched.
    RetrievalDocument,
    /// Text used to search stored documents.
    RetrievalQuery,
}

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Batch requests (used when indexing) are sent with
/// [`TaskType::RetrievalDocument`], at most [`MAX_BATCH_SIZE`] texts per call;
/// single requests (used for queries) with [`TaskType::RetrievalQuery`].
///
/// # Example
///
/// ```rust,ignore
/// use pathfinder_rag::GeminiEmbeddingProvider;
///
/// let provider = GeminiEmbeddingProvider::new("your-api-key")?;
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Create a new provider using the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RagError::EmbeddingService {
                provider: PROVIDER.into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Set the model name, with or without the `models/` prefix.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = model.strip_prefix("models/").map(str::to_string).unwrap_or(model);
        self
    }

    /// Override the dimensionality reported for the configured model.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }

    /// Point the provider at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{method}", self.base_url, self.model)
    }

    fn model_path(&self) -> String {
        format!("models/{}", self.model)
    }

    async fn post<B: Serialize + Sync + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R> {
        let response = self
            .client
            .post(self.endpoint(method))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                service_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(service_error(format!("API returned {status}: {detail}")));
        }

        response.json::<R>().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            service_error(format!("failed to parse response: {e}"))
        })
    }
}

fn service_error(message: String) -> RagError {
    RagError::EmbeddingService { provider: PROVIDER.into(), message }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: TaskType,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct BatchEmbedContentsRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl<'a> EmbedContentRequest<'a> {
    fn new(model: String, text: &'a str, task_type: TaskType) -> Self {
        Self { model, content: Content { parts: [Part { text }] }, task_type }
    }
}

/// Check a batch response against the request it answers.
fn unpack_batch(response: BatchEmbedContentsResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    if response.embeddings.len() != expected {
        return Err(service_error(format!(
            "expected {expected} embeddings, API returned {}",
            response.embeddings.len()
        )));
    }
    Ok(response.embeddings.into_iter().map(|e| e.values).collect())
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = PROVIDER, text_len = text.len(), "embedding single text");

        let request = EmbedContentRequest::new(self.model_path(), text, TaskType::RetrievalQuery);
        let response: EmbedContentResponse = self.post("embedContent", &request).await?;

        if response.embedding.values.is_empty() {
            return Err(service_error("API returned an empty embedding".into()));
        }
        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = PROVIDER, batch_size = texts.len(), model = %self.model, "embedding batch");

        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_BATCH_SIZE) {
            let requests = batch
                .iter()
                .map(|text| {
                    EmbedContentRequest::new(self.model_path(), text, TaskType::RetrievalDocument)
                })
                .collect();
            let response: BatchEmbedContentsResponse =
                self.post("batchEmbedContents", &BatchEmbedContentsRequest { requests }).await?;
            vectors.extend(unpack_batch(response, batch.len())?);
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_blank_api_key() {
        assert!(matches!(
            GeminiEmbeddingProvider::new("  "),
            Err(RagError::EmbeddingService { .. })
        ));
    }

    #[test]
    fn model_prefix_is_normalized() {
        let provider =
            GeminiEmbeddingProvider::new("key").unwrap().with_model("models/text-embedding-004");
        assert_eq!(
            provider.endpoint("embedContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004:embedContent"
        );
    }

    #[test]
    fn request_uses_camel_case_task_type() {
        let request = EmbedContentRequest::new(
            "models/embedding-001".into(),
            "hello",
            TaskType::RetrievalDocument,
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "models/embedding-001",
                "content": {"parts": [{"text": "hello"}]},
                "taskType": "RETRIEVAL_DOCUMENT"
            })
        );
    }

    #[test]
    fn batch_length_mismatch_is_a_service_error() {
        let response: BatchEmbedContentsResponse =
            serde_json::from_value(json!({"embeddings": [{"values": [0.1, 0.2]}]})).unwrap();
        let err = unpack_batch(response, 2).unwrap_err();
        assert!(matches!(err, RagError::EmbeddingService { .. }));
    }

    #[test]
    fn batch_response_preserves_order() {
        let response: BatchEmbedContentsResponse = serde_json::from_value(json!({
            "embeddings": [{"values": [1.0]}, {"values": [2.0]}]
        }))
        .unwrap();
        assert_eq!(unpack_batch(response, 2).unwrap(), vec![vec![1.0], vec![2.0]]);
    }
}

//! Process configuration read from the environment.

/// Default Gemini model for summaries, skill lists and insights.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-pro-002";

/// Default Gemini embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

/// Credentials and model choices for one process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Gemini API key, shared by generation and embeddings.
    pub google_api_key: Option<String>,
    /// RapidAPI key for JSearch; job search is disabled without it.
    pub jsearch_api_key: Option<String>,
    pub generation_model: String,
    pub embedding_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<redacted>"))
            .field("jsearch_api_key", &self.jsearch_api_key.as_ref().map(|_| "<redacted>"))
            .field("generation_model", &self.generation_model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

impl AppConfig {
    /// Read the process environment, after loading a `.env` file if present.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `GOOGLE_API_KEY` (or `GEMINI_API_KEY`) | Gemini credential |
    /// | `JSEARCH_API_KEY` | JSearch credential |
    /// | `PATHFINDER_GENERATION_MODEL` | overrides [`DEFAULT_GENERATION_MODEL`] |
    /// | `PATHFINDER_EMBEDDING_MODEL` | overrides [`DEFAULT_EMBEDDING_MODEL`] |
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            google_api_key: get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            jsearch_api_key: get("JSEARCH_API_KEY"),
            generation_model: get("PATHFINDER_GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            embedding_model: get("PATHFINDER_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        }
    }
}

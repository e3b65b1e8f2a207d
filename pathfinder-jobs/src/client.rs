//! The job-search contract and its JSearch (RapidAPI) implementation.

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::{JobSearchError, Result};
use crate::listing::{JobListing, JobQuery, SearchResponse};

/// The default JSearch endpoint.
pub const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";

/// RapidAPI host header value for JSearch.
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// A job-listing search service.
#[async_trait]
pub trait JobSearch: Send + Sync {
    /// Run one search and return listings in service order.
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>>;
}

/// [`JobSearch`] over the JSearch API on RapidAPI.
///
/// # Example
///
/// ```rust,ignore
/// use pathfinder_jobs::{JSearchClient, JobQuery, JobSearch};
///
/// let client = JSearchClient::new(std::env::var("JSEARCH_API_KEY")?);
/// let jobs = client.search(&JobQuery::for_goal("Data Analyst", Some("Chicago"))).await?;
/// ```
pub struct JSearchClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl JSearchClient {
    /// Create a client authenticated with a RapidAPI key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), api_key: api_key.into(), url: JSEARCH_URL.into() }
    }

    /// A client only when a non-blank key is configured.
    ///
    /// An absent key disables job search instead of failing.
    pub fn from_key(api_key: Option<&str>) -> Option<Self> {
        api_key.map(str::trim).filter(|k| !k.is_empty()).map(Self::new)
    }

    /// Use a different search URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl JobSearch for JSearchClient {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>> {
        debug!(query = %query.text, page = query.page, "searching jobs");

        let page = query.page.to_string();
        let num_pages = query.num_pages.to_string();
        let response = self
            .client
            .get(&self.url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&[
                ("query", query.text.as_str()),
                ("page", page.as_str()),
                ("num_pages", num_pages.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "job search request failed");
                JobSearchError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "job search API error");
            return Err(JobSearchError::Status { status: status.as_u16(), body });
        }

        let decoded: SearchResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse job search response");
            JobSearchError::Decode(e.to_string())
        })?;

        let listings = decoded.into_listings();
        info!(query = %query.text, result_count = listings.len(), "job search completed");
        Ok(listings)
    }
}

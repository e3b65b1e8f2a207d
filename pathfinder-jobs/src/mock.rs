//! Fixed-answer job search for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::JobSearch;
use crate::error::{JobSearchError, Result};
use crate::listing::{JobListing, JobQuery};

/// A [`JobSearch`] that returns the same listings (or the same failure) for
/// every query and records what it was asked.
#[derive(Debug)]
pub struct StaticJobSearch {
    listings: Vec<JobListing>,
    failure: Option<u16>,
    queries: Mutex<Vec<JobQuery>>,
}

impl StaticJobSearch {
    /// Always answer with `listings`.
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings, failure: None, queries: Mutex::new(Vec::new()) }
    }

    /// Always fail with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self { listings: Vec::new(), failure: Some(status), queries: Mutex::new(Vec::new()) }
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<JobQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl JobSearch for StaticJobSearch {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobListing>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        match self.failure {
            Some(status) => {
                Err(JobSearchError::Status { status, body: "service unavailable".into() })
            }
            None => Ok(self.listings.clone()),
        }
    }
}

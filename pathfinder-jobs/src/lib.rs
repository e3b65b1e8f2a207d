//! # pathfinder-jobs
//!
//! Real-time job listings for a career goal.
//!
//! The service is optional: [`JSearchClient::from_key`] returns `None` when no
//! credential is configured, and callers skip the job stage. Responses are
//! validated into typed [`JobListing`]s with defined fallbacks for missing
//! fields.

pub mod client;
pub mod error;
pub mod listing;
pub mod mock;

pub use client::{JSEARCH_URL, JSearchClient, JobSearch};
pub use error::{JobSearchError, Result};
pub use listing::{JobListing, JobQuery, UNKNOWN_EMPLOYER, UNTITLED_ROLE};
pub use mock::StaticJobSearch;

//! Typed job records and the raw wire shape they are validated from.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Title used when the service omits one.
pub const UNTITLED_ROLE: &str = "Untitled role";

/// Employer used when the service omits one.
pub const UNKNOWN_EMPLOYER: &str = "Unknown employer";

/// A search against the job-listing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    /// Free-text query.
    pub text: String,
    /// 1-based page number.
    pub page: u32,
    /// Number of pages to fetch in one request.
    pub num_pages: u32,
}

impl JobQuery {
    /// Build the query for a career goal, optionally scoped to a location.
    ///
    /// A non-blank location produces `"{goal} in {location}"`.
    pub fn for_goal(goal: &str, location: Option<&str>) -> Self {
        let goal = goal.trim();
        let text = match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(location) => format!("{goal} in {location}"),
            None => goal.to_string(),
        };
        Self { text, page: 1, num_pages: 1 }
    }
}

/// One job posting, validated at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// Job title, or [`UNTITLED_ROLE`].
    pub title: String,
    /// Hiring organisation, or [`UNKNOWN_EMPLOYER`].
    pub employer: String,
    /// City, when reported.
    pub city: Option<String>,
    /// State / region, when reported.
    pub region: Option<String>,
    /// Employment type such as `FULLTIME`, when reported.
    pub employment_type: Option<String>,
    /// Posting body; empty when missing.
    pub description: String,
    /// Where to apply, when reported.
    pub apply_url: Option<String>,
}

impl JobListing {
    /// "City, Region" using whichever parts are present.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> =
            [self.city.as_deref(), self.region.as_deref()].into_iter().flatten().collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// The JSearch `/search` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) data: Option<Vec<RawJob>>,
}

/// A job record exactly as JSearch sends it; every field may be absent or null.
#[derive(Debug, Deserialize)]
pub(crate) struct RawJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_employment_type: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawJob {
    /// Apply fallbacks; records with neither title nor employer are dropped.
    pub(crate) fn validate(self) -> Option<JobListing> {
        let title = present(self.job_title);
        let employer = present(self.employer_name);
        if title.is_none() && employer.is_none() {
            debug!("discarding job record without title or employer");
            return None;
        }

        Some(JobListing {
            title: title.unwrap_or_else(|| UNTITLED_ROLE.to_string()),
            employer: employer.unwrap_or_else(|| UNKNOWN_EMPLOYER.to_string()),
            city: present(self.job_city),
            region: present(self.job_state),
            employment_type: present(self.job_employment_type),
            description: self.job_description.unwrap_or_default(),
            apply_url: present(self.job_apply_link),
        })
    }
}

impl SearchResponse {
    pub(crate) fn into_listings(self) -> Vec<JobListing> {
        self.data.unwrap_or_default().into_iter().filter_map(RawJob::validate).collect()
    }
}

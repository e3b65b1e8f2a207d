//! The per-submission coaching pipeline.
//!
//! A [`Coach`] runs one [`Submission`] through a fixed sequence of stages:
//!
//! ```text
//! Idle → CollectingSkills → GeneratingSummary → RetrievingPatterns → FetchingJobs → Done
//! ```
//!
//! Only the summary is mandatory. Every other stage either completes, is
//! skipped because its precondition is unmet, or fails with a message that
//! stays on the [`Report`]; none of them stop the run.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use pathfinder_jobs::{JobListing, JobQuery, JobSearch};
use pathfinder_model::TextGenerator;
use pathfinder_rag::IndexStore;
use tracing::{debug, info, instrument, warn};

use crate::error::{CoachError, Result};
use crate::prompt::{self, Tone};

/// Shown when job search has no credential.
pub const JOB_SEARCH_DISABLED: &str =
    "Job search is not configured. Set JSEARCH_API_KEY to see live listings.";

/// Shown when job search succeeds with nothing.
pub const NO_JOB_MATCHES: &str = "No job matches found. Try a broader goal or another location.";

/// One user's form input.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub tone: Tone,
    /// Skills the user already claims.
    pub skills: Vec<String>,
    pub location: Option<String>,
    /// Industry for the skills quiz.
    pub industry: Option<String>,
    /// Whether the skills quiz runs when an industry is given.
    pub quiz: bool,
    /// Free-text question answered from the résumé index.
    pub pattern_query: Option<String>,
}

/// Pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    CollectingSkills,
    GeneratingSummary,
    RetrievingPatterns,
    FetchingJobs,
    Done,
}

impl Stage {
    /// The stage that follows this one. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            Stage::Idle => Stage::CollectingSkills,
            Stage::CollectingSkills => Stage::GeneratingSummary,
            Stage::GeneratingSummary => Stage::RetrievingPatterns,
            Stage::RetrievingPatterns => Stage::FetchingJobs,
            Stage::FetchingJobs | Stage::Done => Stage::Done,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Idle => "idle",
            Stage::CollectingSkills => "collecting skills",
            Stage::GeneratingSummary => "generating summary",
            Stage::RetrievingPatterns => "retrieving patterns",
            Stage::FetchingJobs => "fetching jobs",
            Stage::Done => "done",
        })
    }
}

/// What happened to an optional stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    Completed(T),
    /// The precondition was unmet; carries the reason.
    Skipped(String),
    /// The stage ran and failed; carries a user-facing message.
    Failed(String),
}

impl<T> StageOutcome<T> {
    pub fn completed(&self) -> Option<&T> {
        match self {
            StageOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed(_))
    }
}

/// A learning suggestion for a skill the user lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningTip {
    pub skill: String,
    /// The recommendation, or why it could not be generated.
    pub recommendation: std::result::Result<String, String>,
}

/// Result of the skills quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCheck {
    pub industry: String,
    /// Skills the model listed for the industry.
    pub suggested: Vec<String>,
    /// Suggested skills the user already has.
    pub matched: Vec<String>,
    /// One tip per suggested skill the user lacks.
    pub missing: Vec<LearningTip>,
}

/// Résumé excerpts for the pattern query, plus a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInsight {
    pub query: String,
    pub excerpts: Vec<String>,
    pub insight: StageOutcome<String>,
}

/// Listings returned for the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMatches {
    pub query: String,
    pub listings: Vec<JobListing>,
}

impl JobMatches {
    /// An informational message when there is nothing to show.
    pub fn notice(&self) -> Option<&'static str> {
        self.listings.is_empty().then_some(NO_JOB_MATCHES)
    }
}

/// Everything one submission produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub skills: StageOutcome<SkillCheck>,
    /// Skills fed into the summary prompt.
    pub combined_skills: Vec<String>,
    pub summary: String,
    pub patterns: StageOutcome<PatternInsight>,
    pub jobs: StageOutcome<JobMatches>,
    /// Stages visited, in order, ending with [`Stage::Done`].
    pub trail: Vec<Stage>,
}

impl Report {
    fn pending() -> Self {
        let not_run = || "not run".to_string();
        Self {
            skills: StageOutcome::Skipped(not_run()),
            combined_skills: Vec::new(),
            summary: String::new(),
            patterns: StageOutcome::Skipped(not_run()),
            jobs: StageOutcome::Skipped(not_run()),
            trail: Vec::new(),
        }
    }
}

/// Tunables for a [`Coach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachSettings {
    /// How many skills the quiz asks for.
    pub skill_count: usize,
    /// How many résumé excerpts back a pattern query.
    pub top_k: usize,
    /// Maximum listings kept from one search.
    pub job_limit: usize,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self { skill_count: 5, top_k: 4, job_limit: 5 }
    }
}

/// Runs submissions against shared collaborators.
///
/// # Example
///
/// ```rust,ignore
/// let coach = Coach::new(generator, store).with_job_search(jobs);
/// let report = coach.run(&submission).await?;
/// ```
pub struct Coach {
    generator: Arc<dyn TextGenerator>,
    index: Arc<IndexStore>,
    jobs: Option<Arc<dyn JobSearch>>,
    settings: CoachSettings,
}

impl Coach {
    /// A coach without job search. `top_k` follows the store's config.
    pub fn new(generator: Arc<dyn TextGenerator>, index: Arc<IndexStore>) -> Self {
        let settings =
            CoachSettings { top_k: index.builder().config().top_k, ..CoachSettings::default() };
        Self { generator, index, jobs: None, settings }
    }

    /// Enable or disable job search.
    pub fn with_job_search(mut self, jobs: Option<Arc<dyn JobSearch>>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_settings(mut self, settings: CoachSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &CoachSettings {
        &self.settings
    }

    /// Run one submission to completion.
    ///
    /// # Errors
    ///
    /// Only [`CoachError::Summary`]; optional stage failures are recorded on
    /// the returned [`Report`].
    #[instrument(skip_all, fields(name = %submission.name, goal = %submission.goal))]
    pub async fn run(&self, submission: &Submission) -> Result<Report> {
        let mut report = Report::pending();
        let mut stage = Stage::Idle;

        loop {
            report.trail.push(stage);
            debug!(%stage, "entering stage");

            match stage {
                Stage::Idle => {}
                Stage::CollectingSkills => {
                    report.skills = self.collect_skills(submission).await;
                }
                Stage::GeneratingSummary => {
                    let confirmed =
                        report.skills.completed().map(|check| check.matched.clone()).unwrap_or_default();
                    report.combined_skills = prompt::combine_skills(&confirmed, &submission.skills);
                    report.summary =
                        self.generate_summary(submission, &report.combined_skills).await?;
                }
                Stage::RetrievingPatterns => {
                    report.patterns = self.retrieve_patterns(submission).await;
                }
                Stage::FetchingJobs => {
                    report.jobs = self.fetch_jobs(submission).await;
                }
                Stage::Done => break,
            }

            stage = stage.next();
        }

        info!(
            skills_failed = report.skills.is_failed(),
            patterns_failed = report.patterns.is_failed(),
            jobs_failed = report.jobs.is_failed(),
            "submission completed"
        );
        Ok(report)
    }

    async fn collect_skills(&self, submission: &Submission) -> StageOutcome<SkillCheck> {
        let Some(industry) = non_blank(submission.industry.as_deref()) else {
            return StageOutcome::Skipped("No industry selected".into());
        };
        if !submission.quiz {
            return StageOutcome::Skipped("Skills quiz disabled".into());
        }

        let answer = match self
            .generator
            .generate(&prompt::skills_prompt(industry, self.settings.skill_count))
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, industry, "skill list generation failed");
                return StageOutcome::Failed(format!("Could not generate a skills quiz: {e}"));
            }
        };

        let suggested = prompt::split_bullet_list(&answer);
        let owned: HashSet<String> =
            submission.skills.iter().map(|s| s.trim().to_lowercase()).collect();
        let (matched, lacking): (Vec<String>, Vec<String>) =
            suggested.iter().cloned().partition(|s| owned.contains(&s.to_lowercase()));

        let mut missing = Vec::with_capacity(lacking.len());
        for skill in lacking {
            let recommendation = self
                .generator
                .generate(&prompt::learning_prompt(&skill))
                .await
                .map(|text| text.trim().to_string())
                .map_err(|e| {
                    warn!(error = %e, skill = %skill, "learning recommendation failed");
                    format!("No recommendation available: {e}")
                });
            missing.push(LearningTip { skill, recommendation });
        }

        info!(
            industry,
            suggested = suggested.len(),
            matched = matched.len(),
            missing = missing.len(),
            "skills quiz evaluated"
        );
        StageOutcome::Completed(SkillCheck {
            industry: industry.to_string(),
            suggested,
            matched,
            missing,
        })
    }

    async fn generate_summary(&self, submission: &Submission, skills: &[String]) -> Result<String> {
        let prompt = prompt::summary_prompt(
            &submission.name,
            &submission.role,
            &skills.join(", "),
            &submission.goal,
            submission.tone,
        );
        let summary = self.generator.generate(&prompt).await.map_err(CoachError::Summary)?;
        info!(tone = %submission.tone, "summary generated");
        Ok(summary.trim().to_string())
    }

    async fn retrieve_patterns(&self, submission: &Submission) -> StageOutcome<PatternInsight> {
        let Some(query) = non_blank(submission.pattern_query.as_deref()) else {
            return StageOutcome::Skipped("No pattern query given".into());
        };
        if self.index.current().await.is_none() {
            return StageOutcome::Skipped("No résumé index available".into());
        }

        let excerpts = match self.index.retrieve(query, self.settings.top_k).await {
            Ok(excerpts) => excerpts,
            Err(e) => {
                warn!(error = %e, "pattern retrieval failed");
                return StageOutcome::Failed(format!("Could not search the résumé: {e}"));
            }
        };

        let insight = if excerpts.is_empty() {
            StageOutcome::Skipped("No résumé excerpts matched".into())
        } else {
            let prompt = prompt::insight_prompt(query, &submission.goal, &excerpts);
            match self.generator.generate(&prompt).await {
                Ok(text) => StageOutcome::Completed(text.trim().to_string()),
                Err(e) => {
                    warn!(error = %e, "insight generation failed");
                    StageOutcome::Failed(format!("Could not generate an insight: {e}"))
                }
            }
        };

        debug!(excerpt_count = excerpts.len(), "patterns retrieved");
        StageOutcome::Completed(PatternInsight { query: query.to_string(), excerpts, insight })
    }

    async fn fetch_jobs(&self, submission: &Submission) -> StageOutcome<JobMatches> {
        let Some(jobs) = self.jobs.as_ref() else {
            return StageOutcome::Skipped(JOB_SEARCH_DISABLED.into());
        };
        let Some(goal) = non_blank(Some(&submission.goal)) else {
            return StageOutcome::Skipped("No career goal given".into());
        };

        let query = JobQuery::for_goal(goal, submission.location.as_deref());
        match jobs.search(&query).await {
            Ok(mut listings) => {
                listings.truncate(self.settings.job_limit);
                info!(query = %query.text, shown = listings.len(), "job listings fetched");
                StageOutcome::Completed(JobMatches { query: query.text, listings })
            }
            Err(e) => {
                warn!(error = %e, query = %query.text, "job search failed");
                StageOutcome::Failed(format!("Job search failed: {e}"))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order() {
        let mut stage = Stage::Idle;
        let mut seen = vec![stage];
        while stage != Stage::Done {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            [
                Stage::Idle,
                Stage::CollectingSkills,
                Stage::GeneratingSummary,
                Stage::RetrievingPatterns,
                Stage::FetchingJobs,
                Stage::Done,
            ]
        );
        assert_eq!(Stage::Done.next(), Stage::Done);
    }

    #[test]
    fn empty_matches_carry_a_notice() {
        let matches = JobMatches { query: "x".into(), listings: Vec::new() };
        assert_eq!(matches.notice(), Some(NO_JOB_MATCHES));
    }

    #[test]
    fn outcome_accessors() {
        let done: StageOutcome<u8> = StageOutcome::Completed(1);
        assert_eq!(done.completed(), Some(&1));
        assert!(StageOutcome::<u8>::Skipped("x".into()).is_skipped());
        assert!(StageOutcome::<u8>::Failed("x".into()).is_failed());
    }
}

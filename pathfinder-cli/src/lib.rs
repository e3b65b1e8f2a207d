//! # pathfinder-cli
//!
//! The career-coaching pipeline and the `pathfinder` binary around it.
//!
//! - [`Coach`] - runs one [`Submission`] through the stage machine
//! - [`prompt`] - prompt templates and the bullet-list parser
//! - [`render`] - plain-text reports
//! - [`resume`] - résumé loading, including PDF text extraction
//! - [`AppConfig`] - credentials and model names from the environment

pub mod coach;
pub mod config;
pub mod error;
pub mod prompt;
pub mod render;
pub mod resume;
pub mod telemetry;

pub use coach::{
    Coach, CoachSettings, JOB_SEARCH_DISABLED, JobMatches, LearningTip, NO_JOB_MATCHES,
    PatternInsight, Report, SkillCheck, Stage, StageOutcome, Submission,
};
pub use config::AppConfig;
pub use error::{CoachError, ResumeError, Result};
pub use prompt::{Tone, split_bullet_list};
pub use resume::load_document;

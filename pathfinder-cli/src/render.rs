//! Plain-text rendering of a [`Report`].

use std::fmt::Write;

use pathfinder_jobs::JobListing;

use crate::coach::{Report, StageOutcome};

/// Job descriptions are cut to this many characters.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 250;

/// Render a report for the terminal.
pub fn report(report: &Report) -> String {
    let mut out = String::new();

    section(&mut out, "Resume Summary");
    let _ = writeln!(out, "{}\n", report.summary);

    section(&mut out, "Skills Check");
    match &report.skills {
        StageOutcome::Completed(check) => {
            let _ = writeln!(out, "Essential skills for {}:", check.industry);
            for skill in &check.suggested {
                let mark = if check.matched.contains(skill) { "x" } else { " " };
                let _ = writeln!(out, "  [{mark}] {skill}");
            }
            if check.missing.is_empty() {
                let _ = writeln!(out, "You already have every listed skill.");
            } else {
                let _ = writeln!(out, "\nWhere to learn what is missing:");
                for tip in &check.missing {
                    match &tip.recommendation {
                        Ok(text) => {
                            let _ = writeln!(out, "  - {}: {}", tip.skill, text);
                        }
                        Err(message) => {
                            let _ = writeln!(out, "  - {}: ({message})", tip.skill);
                        }
                    }
                }
            }
        }
        other => outcome_note(&mut out, other),
    }
    out.push('\n');

    section(&mut out, "Resume Patterns");
    match &report.patterns {
        StageOutcome::Completed(patterns) => {
            let _ = writeln!(out, "Query: {}", patterns.query);
            for (i, excerpt) in patterns.excerpts.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, one_line(excerpt));
            }
            match &patterns.insight {
                StageOutcome::Completed(text) => {
                    let _ = writeln!(out, "\nInsight: {text}");
                }
                other => outcome_note(&mut out, other),
            }
        }
        other => outcome_note(&mut out, other),
    }
    out.push('\n');

    section(&mut out, "Job Listings");
    match &report.jobs {
        StageOutcome::Completed(matches) => {
            let _ = writeln!(out, "Search: {}", matches.query);
            if let Some(notice) = matches.notice() {
                let _ = writeln!(out, "{notice}");
            }
            for listing in &matches.listings {
                job(&mut out, listing);
            }
        }
        other => outcome_note(&mut out, other),
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "== {title} ==");
}

fn outcome_note<T>(out: &mut String, outcome: &StageOutcome<T>) {
    match outcome {
        StageOutcome::Skipped(reason) => {
            let _ = writeln!(out, "(skipped) {reason}");
        }
        StageOutcome::Failed(message) => {
            let _ = writeln!(out, "warning: {message}");
        }
        StageOutcome::Completed(_) => {}
    }
}

fn job(out: &mut String, listing: &JobListing) {
    let _ = writeln!(out, "\n* {} at {}", listing.title, listing.employer);
    let details: Vec<String> =
        [listing.location(), listing.employment_type.clone()].into_iter().flatten().collect();
    if !details.is_empty() {
        let _ = writeln!(out, "  {}", details.join(" | "));
    }
    if !listing.description.trim().is_empty() {
        let _ = writeln!(out, "  {}", preview(&listing.description, DESCRIPTION_PREVIEW_CHARS));
    }
    if let Some(url) = &listing.apply_url {
        let _ = writeln!(out, "  Apply: {url}");
    }
}

/// First `max` characters of `text` on one line, with `...` when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = one_line(text);
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max).collect();
    cut.push_str("...");
    cut
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

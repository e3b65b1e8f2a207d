//! Prompt templates and parsing of generated lists.
//!
//! User fields are substituted verbatim; this is a single-user local tool and
//! the prompts are not sanitized.

use std::collections::HashSet;
use std::fmt;

use clap::ValueEnum;

/// Voice requested for the résumé summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Tone {
    #[default]
    Professional,
    Confident,
    Enthusiastic,
    Strategic,
    Creative,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Tone::Professional => "professional",
            Tone::Confident => "confident",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Strategic => "strategic",
            Tone::Creative => "creative",
        };
        f.write_str(word)
    }
}

pub fn skills_prompt(industry: &str, count: usize) -> String {
    format!(
        "List {count} essential skills that professionals in the {industry} industry should have. \
         Respond with only the list, no explanation."
    )
}

pub fn learning_prompt(skill: &str) -> String {
    format!(
        "Suggest a free or well-known online course or video tutorial for someone who wants to \
         learn '{skill}'. Return only one recommendation."
    )
}

pub fn summary_prompt(name: &str, role: &str, skills: &str, goal: &str, tone: Tone) -> String {
    format!(
        "Write a {tone} professional resume summary for {name}, currently a {role}, \
         with skills in {skills}, seeking a role in {goal}."
    )
}

/// Retrieval-augmented prompt: answer `question` from résumé excerpts only.
pub fn insight_prompt(question: &str, goal: &str, excerpts: &[String]) -> String {
    let mut prompt = format!(
        "You are a career coach. Using only the resume excerpts below, answer the question in \
         two or three sentences.\n\nQuestion: {question}\n"
    );
    if !goal.trim().is_empty() {
        prompt.push_str(&format!("Career goal: {goal}\n"));
    }
    prompt.push_str("\nResume excerpts:\n");
    for excerpt in excerpts {
        prompt.push_str(&format!("- {}\n", excerpt.trim()));
    }
    prompt
}

/// Split a generated bullet list into clean, unique items.
///
/// Lines are split on real line breaks. Each line loses surrounding
/// whitespace, leading bullets (`-`, `*`, `•`), leading numbering (`1.`,
/// `2)`), and markdown bold markers. Blank items are dropped and duplicates
/// are removed case-insensitively, keeping the first. A single line that
/// contains commas is treated as a comma-separated list.
pub fn split_bullet_list(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let raw: Vec<&str> = match lines.as_slice() {
        [single] if single.contains(',') => single.split(',').collect(),
        _ => lines,
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

fn clean_item(line: &str) -> String {
    let mut item = line.trim().trim_start_matches(['-', '*', '•', '·']).trim_start();

    let digits = item.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = item[digits..].strip_prefix(['.', ')']) {
            item = rest.trim_start();
        }
    }

    item.replace("**", "").trim().to_string()
}

/// Merge quiz-confirmed skills with the user's own, dropping duplicates
/// case-insensitively and keeping first-seen order.
pub fn combine_skills<'a>(
    confirmed: impl IntoIterator<Item = &'a String>,
    own: impl IntoIterator<Item = &'a String>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    confirmed
        .into_iter()
        .chain(own)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullets_numbers_and_bold() {
        let text = "- **Data analysis**\n* SQL\n• Stakeholder management\n4. Python\n5) Tableau\n";
        assert_eq!(
            split_bullet_list(text),
            ["Data analysis", "SQL", "Stakeholder management", "Python", "Tableau"]
        );
    }

    #[test]
    fn drops_blank_lines_and_duplicates() {
        let text = "\n- SQL\n\n- sql\n-   \n- Excel\n";
        assert_eq!(split_bullet_list(text), ["SQL", "Excel"]);
    }

    #[test]
    fn escaped_newline_token_is_not_a_separator() {
        assert_eq!(split_bullet_list("SEO\\nCopywriting"), ["SEO\\nCopywriting"]);
    }

    #[test]
    fn single_comma_line_is_split() {
        assert_eq!(
            split_bullet_list("Budgeting, Forecasting, Risk analysis"),
            ["Budgeting", "Forecasting", "Risk analysis"]
        );
    }

    #[test]
    fn multi_line_items_keep_their_commas() {
        let text = "- Negotiation, especially vendor contracts\n- Forecasting";
        assert_eq!(
            split_bullet_list(text),
            ["Negotiation, especially vendor contracts", "Forecasting"]
        );
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(split_bullet_list("- A\r\n- B\r\n"), ["A", "B"]);
    }

    #[test]
    fn numbers_without_punctuation_are_kept() {
        assert_eq!(split_bullet_list("- 3D modeling\n- 5G networks"), ["3D modeling", "5G networks"]);
    }

    #[test]
    fn summary_prompt_substitutes_fields() {
        let prompt = summary_prompt("Ana", "Analyst", "SQL, Python", "Data Science", Tone::Strategic);
        assert_eq!(
            prompt,
            "Write a strategic professional resume summary for Ana, currently a Analyst, \
             with skills in SQL, Python, seeking a role in Data Science."
        );
    }

    #[test]
    fn combine_skills_dedups_across_sources() {
        let confirmed = vec!["SQL".to_string(), "Python".to_string()];
        let own = vec!["python".to_string(), " Leadership ".to_string(), String::new()];
        assert_eq!(combine_skills(&confirmed, &own), ["SQL", "Python", "Leadership"]);
    }

    #[test]
    fn insight_prompt_lists_excerpts() {
        let prompt = insight_prompt("Am I ready?", "", &["Led a team".to_string()]);
        assert!(prompt.contains("Question: Am I ready?"));
        assert!(prompt.contains("- Led a team\n"));
        assert!(!prompt.contains("Career goal"));
    }
}

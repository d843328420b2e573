//! Experience bullet heuristics: impact-oriented rewrites and keyword weaving.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ExperienceEntry;

static LINE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n|•|-|\*").expect("valid bullet split regex"));
static JD_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z0-9+.\-]{3,}\b").expect("valid jd word regex"));
static ACTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Led|Built|Created|Implemented|Developed|Improved|Optimized|Managed|Designed)")
        .expect("valid action verb regex")
});
static CONNECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(using|with|via|leveraging)\s+").expect("valid connector regex")
});

/// JD terms considered for the "using <keyword>" boost.
const TOP_JD_WORDS: usize = 10;
/// Missing keywords considered when weaving.
const MAX_WEAVE_KEYWORDS: usize = 15;
const DEFAULT_ACTION_VERB: &str = "Improved";
const IMPACT_PLACEHOLDER: &str = " resulting in [X%] improvement";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletSuggestion {
    pub company: String,
    pub job_title: String,
    pub original: String,
    pub suggestion: String,
}

/// Splits a responsibilities blob into trimmed, non-empty bullet lines.
pub fn split_lines(text: &str) -> Vec<String> {
    LINE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// First distinct JD words, in order of appearance.
fn top_jd_words(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    let mut seen = HashSet::new();
    JD_WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| seen.insert(*w))
        .take(TOP_JD_WORDS)
        .map(str::to_string)
        .collect()
}

/// Rewrites one bullet: unquantified lines get an action verb and an impact
/// placeholder, and the first JD word the line lacks is appended.
pub fn optimize_line(line: &str, jd_words: &[String]) -> String {
    let mut suggestion = line.to_string();

    if !suggestion.chars().any(|c| c.is_ascii_digit()) {
        if !ACTION_VERB_RE.is_match(&suggestion) {
            suggestion = format!("{DEFAULT_ACTION_VERB} {suggestion}");
        }
        suggestion.push_str(IMPACT_PLACEHOLDER);
    }

    let lowered = suggestion.to_lowercase();
    if let Some(boost) = jd_words.iter().find(|k| !lowered.contains(k.as_str())) {
        suggestion.push_str(" using ");
        suggestion.push_str(boost);
    }

    suggestion
}

pub fn optimize_bullets(
    experience: &[ExperienceEntry],
    job_description: &str,
) -> Vec<BulletSuggestion> {
    let jd_words = top_jd_words(job_description);

    experience
        .iter()
        .flat_map(|exp| {
            split_lines(&exp.responsibilities)
                .into_iter()
                .map(|original| BulletSuggestion {
                    company: exp.company.clone(),
                    job_title: exp.job_title.clone(),
                    suggestion: optimize_line(&original, &jd_words),
                    original,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Appends the first keyword the line does not already mention.
pub fn weave_line(line: &str, keywords: &[String]) -> String {
    let lowered = line.to_lowercase();
    let Some(picked) = keywords.iter().find(|k| !lowered.contains(k.as_str())) else {
        return line.to_string();
    };

    if CONNECTOR_RE.is_match(line) {
        format!("{line} {picked}")
    } else {
        format!("{line} using {picked}")
    }
}

/// Weaves missing keywords into every experience entry's bullets. Bullet
/// lines are normalized to newline-separated form either way.
pub fn weave_keywords(
    experience: &[ExperienceEntry],
    missing_keywords: &[String],
) -> Vec<ExperienceEntry> {
    let keywords: Vec<String> = missing_keywords
        .iter()
        .take(MAX_WEAVE_KEYWORDS)
        .map(|k| k.to_lowercase())
        .collect();

    experience
        .iter()
        .map(|exp| {
            let lines: Vec<String> = split_lines(&exp.responsibilities)
                .iter()
                .map(|line| weave_line(line, &keywords))
                .collect();
            ExperienceEntry {
                responsibilities: lines.join("\n"),
                ..exp.clone()
            }
        })
        .collect()
}

//! JD parser: heuristic extraction of title, level, location, employment
//! type, skills and responsibilities from a raw job description.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Title|Position|Role)\s*[:\-]\s*(.+)").expect("valid title regex")
});
static TITLE_CUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.|\n").expect("valid cut regex"));
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(Remote|Hybrid|Onsite|On-site|\b[A-Z][a-zA-Z]+,?\s?[A-Z]{2}\b|\b[A-Z][a-zA-Z]+,?\s?[A-Z][a-zA-Z]+\b)",
    )
    .expect("valid location regex")
});
static EMPLOYMENT_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Full[- ]?time|Part[- ]?time|Contract|Internship|Temporary)")
        .expect("valid employment type regex")
});
static LEVEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Senior|Mid[- ]?level|Junior|Lead|Principal|Staff)").expect("valid level regex")
});
static SKILL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9+.#\-]{2,}\b").expect("valid skill regex"));
static RESPONSIBILITIES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Responsibilities|What you will do|Your impact)[:\-\s]+([\s\S]+)")
        .expect("valid responsibilities regex")
});
static RESPONSIBILITY_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n•\-]").expect("valid responsibility split regex"));

/// Shorter inputs are not treated as a job description.
pub const MIN_JD_CHARS: usize = 30;
const MAX_SKILLS: usize = 30;
const MAX_RESPONSIBILITIES: usize = 10;
const MIN_RESPONSIBILITY_CHARS: usize = 25;
const FALLBACK_TITLE_CHARS: usize = 80;
const UNSPECIFIED: &str = "Unspecified";

const JD_STOP_WORDS: &[&str] = &[
    "with", "and", "for", "the", "this", "that", "have", "will", "your", "from", "you", "our",
    "are", "job", "role", "must", "need", "work", "team", "skills", "experience", "requirements",
    "years", "year", "about", "who", "a", "an", "of", "in", "to", "as", "on", "is", "be", "or",
    "it", "we", "they", "their", "them", "has", "had", "was", "were", "at", "by", "per", "not",
    "any", "more", "less", "plus",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJobDescription {
    pub title: String,
    pub level: String,
    pub location: String,
    pub employment_type: String,
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub raw_text: String,
}

/// True when the text is long enough to be worth parsing.
pub fn is_parseable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_JD_CHARS
}

pub fn parse_job_description(text: &str) -> ParsedJobDescription {
    ParsedJobDescription {
        title: extract_title(text),
        level: first_capture(&LEVEL_RE, text, 1),
        location: LOCATION_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        employment_type: first_capture(&EMPLOYMENT_TYPE_RE, text, 1),
        skills: extract_skills(text),
        responsibilities: extract_responsibilities(text),
        raw_text: text.to_string(),
    }
}

fn first_capture(re: &Regex, text: &str, group: usize) -> String {
    re.captures(text)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNSPECIFIED.to_string())
}

/// Labelled title ("Role: ...") up to the first period, otherwise the first
/// line of the posting.
fn extract_title(text: &str) -> String {
    let title = match TITLE_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => TITLE_CUT_RE
            .split(m.as_str())
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => text
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(FALLBACK_TITLE_CHARS)
            .collect(),
    };

    if title.is_empty() {
        "Unknown Title".to_string()
    } else {
        title
    }
}

fn extract_skills(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    SKILL_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !JD_STOP_WORDS.contains(w))
        .filter(|w| seen.insert(*w))
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

fn extract_responsibilities(text: &str) -> Vec<String> {
    let section = RESPONSIBILITIES_RE
        .captures(text)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
        .unwrap_or(text);

    RESPONSIBILITY_SPLIT_RE
        .split(section)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_RESPONSIBILITY_CHARS)
        .take(MAX_RESPONSIBILITIES)
        .map(str::to_string)
        .collect()
}

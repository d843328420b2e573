//! Pasted LinkedIn profile text → resume fragments. Line-based heuristics
//! only; nothing is fetched.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::{EducationEntry, ExperienceEntry};

static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid line regex"));
static SKILL_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)skills|technologies|tools").expect("valid skill line regex"));
static SKILL_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:,]|•|\||-").expect("valid skill split regex"));
static POSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\d+\.)?\s*(.+) at (.+) \((\d{4}.*?\d{4}|Present.*?)\)")
        .expect("valid position regex")
});
static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Bachelor|Master|B\.?Tech|M\.?Tech|BSc|MSc|BE|ME).+ at (.+)(?:, (.+))?")
        .expect("valid degree regex")
});

/// Shorter pastes are not treated as a profile.
pub const MIN_PROFILE_CHARS: usize = 50;
const SUMMARY_LINES: usize = 6;
const MAX_SKILL_CHARS: usize = 40;
const MAX_SKILLS: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedProfile {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

pub fn is_importable(text: &str) -> bool {
    text.chars().count() >= MIN_PROFILE_CHARS
}

/// Trimmed, non-empty lines.
fn profile_lines(text: &str) -> Vec<&str> {
    LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn import_profile(text: &str) -> ImportedProfile {
    let lines = profile_lines(text);

    ImportedProfile {
        summary: lines
            .iter()
            .take(SUMMARY_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
        skills: extract_skills(&lines),
        experience: lines.iter().filter_map(|l| parse_position(l)).collect(),
        education: lines.iter().filter_map(|l| parse_degree(l)).collect(),
    }
}

/// Pieces of every line that mentions skills, technologies or tools. The
/// label itself ("Skills") survives as an entry.
fn extract_skills(lines: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter(|l| SKILL_LINE_RE.is_match(l))
        .flat_map(|l| SKILL_SPLIT_RE.split(l))
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().count() <= MAX_SKILL_CHARS)
        .filter(|s| seen.insert(*s))
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

/// "Title at Company (2019 - 2023)" or "... (Present)".
pub fn parse_position(line: &str) -> Option<ExperienceEntry> {
    let caps = POSITION_RE.captures(line)?;
    let dates = caps.get(3).map_or("", |m| m.as_str());
    Some(ExperienceEntry {
        job_title: caps[1].to_string(),
        company: caps[2].to_string(),
        current_job: dates.to_lowercase().contains("present"),
        ..ExperienceEntry::default()
    })
}

/// Degree lines keep the whole line as the degree; the institution is what
/// follows the last " at ".
pub fn parse_degree(line: &str) -> Option<EducationEntry> {
    let caps = DEGREE_RE.captures(line)?;
    Some(EducationEntry {
        degree: caps[0].to_string(),
        institution: caps.get(2).map_or(String::new(), |m| m.as_str().to_string()),
        location: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
        ..EducationEntry::default()
    })
}

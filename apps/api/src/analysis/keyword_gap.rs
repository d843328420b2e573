//! Keyword gap: which job-description terms the resume never mentions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::tokenize::{frequency, tokens, unique};

/// Missing keywords returned to the client.
const MAX_MISSING: usize = 25;
/// Missing keywords quoted in the "Consider including" suggestion.
const SUGGESTED_MISSING: usize = 10;
/// Below this coverage the report nudges for more exact keywords.
const LOW_COVERAGE: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub keyword: String,
    pub resume_count: usize,
    /// How often the keyword appears in the job description.
    pub jd_weight: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGapReport {
    pub coverage: u32,
    pub matched_keywords: Vec<KeywordMatch>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Unique JD tokens split into those the resume covers and those it lacks.
/// `missing` is complete and sorted by JD frequency, descending.
#[derive(Debug, Clone)]
pub struct KeywordPartition {
    pub matched: Vec<KeywordMatch>,
    pub missing: Vec<String>,
    pub unique_jd_count: usize,
}

/// Compares a resume document against a job description.
///
/// The resume is matched through its compact JSON form, so every field
/// (education, achievements, hobbies, even field names) counts as evidence.
pub fn analyze_keyword_gap(resume: &Value, job_description: &str) -> KeywordGapReport {
    let resume_text = resume.to_string();
    compute_keyword_gap(&resume_text, job_description)
}

/// Text-level variant of [`analyze_keyword_gap`].
pub fn compute_keyword_gap(resume_text: &str, job_description: &str) -> KeywordGapReport {
    let partition = partition_keywords(resume_text, job_description);

    let coverage = coverage_percent(partition.matched.len(), partition.unique_jd_count);

    let mut missing_keywords = partition.missing;
    missing_keywords.truncate(MAX_MISSING);

    let suggestions = build_suggestions(coverage, &missing_keywords);

    KeywordGapReport {
        coverage,
        matched_keywords: partition.matched,
        missing_keywords,
        suggestions,
    }
}

pub fn partition_keywords(resume_text: &str, job_description: &str) -> KeywordPartition {
    let jd_tokens = tokens(job_description);
    let jd_freq = frequency(&jd_tokens);
    let resume_freq = frequency(&tokens(resume_text));
    let unique_jd = unique(&jd_tokens);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in &unique_jd {
        match resume_freq.get(keyword) {
            Some(&resume_count) => matched.push(KeywordMatch {
                keyword: keyword.clone(),
                resume_count,
                jd_weight: jd_weight(&jd_freq, keyword),
            }),
            None => missing.push(keyword.clone()),
        }
    }

    // Stable sort: equally frequent keywords keep their JD order.
    missing.sort_by(|a, b| jd_weight(&jd_freq, b).cmp(&jd_weight(&jd_freq, a)));

    KeywordPartition {
        matched,
        missing,
        unique_jd_count: unique_jd.len(),
    }
}

fn jd_weight(jd_freq: &HashMap<String, usize>, keyword: &str) -> usize {
    jd_freq.get(keyword).copied().unwrap_or(0)
}

/// Rounded share of unique JD keywords found in the resume, 0 – 100.
pub fn coverage_percent(matched: usize, unique_jd: usize) -> u32 {
    if unique_jd == 0 {
        return 0;
    }
    ((matched as f64 / unique_jd as f64) * 100.0).round() as u32
}

fn build_suggestions(coverage: u32, missing: &[String]) -> Vec<String> {
    let mut suggestions = Vec::new();
    if coverage < LOW_COVERAGE {
        suggestions.push(
            "Add more exact keywords from the JD into your skills and bullets.".to_string(),
        );
    }
    if !missing.is_empty() {
        let quoted: Vec<&str> = missing
            .iter()
            .take(SUGGESTED_MISSING)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Consider including: {}", quoted.join(", ")));
    }
    suggestions.push(
        "Mirror phrasing used in the JD where truthful (avoid keyword stuffing).".to_string(),
    );
    suggestions
}

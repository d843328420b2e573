//! Tailoring heuristics: JD-aware skill ordering, a fallback summary, and the
//! builder's section order.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::resume::ResumeData;

static JD_SKILL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9+.#\-]{3,}\b").expect("valid jd skill regex"));

const MIN_SUMMARY_CHARS: usize = 40;
const SUMMARY_SKILLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredContent {
    pub summary: String,
    pub skills: Vec<String>,
}

/// Candidate profile driving the section order. Anything other than
/// `"fresher"` is treated as experienced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateType {
    Fresher,
    #[default]
    Experienced,
}

impl<'de> Deserialize<'de> for CandidateType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("fresher") => CandidateType::Fresher,
            _ => CandidateType::Experienced,
        })
    }
}

fn jd_skill_set(job_description: &str) -> HashSet<String> {
    JD_SKILL_RE
        .find_iter(&job_description.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Moves skills named in the JD to the front, keeping relative order within
/// both groups.
pub fn prioritize_skills(skills: &[String], job_description: &str) -> Vec<String> {
    let wanted = jd_skill_set(job_description);
    let (mut front, back): (Vec<String>, Vec<String>) = skills
        .iter()
        .cloned()
        .partition(|s| wanted.contains(&s.to_lowercase()));
    front.extend(back);
    front
}

/// Keeps a usable summary; otherwise writes a short one from the name and
/// the first few skills.
pub fn fallback_summary(resume: &ResumeData) -> String {
    if resume.summary.chars().count() >= MIN_SUMMARY_CHARS {
        return resume.summary.clone();
    }

    let name = if resume.personal_details.full_name.is_empty() {
        "I"
    } else {
        resume.personal_details.full_name.as_str()
    };
    let skills: Vec<&str> = resume
        .skills
        .iter()
        .take(SUMMARY_SKILLS)
        .map(String::as_str)
        .collect();

    format!(
        "{name} is a motivated professional with experience in {}. \
         Strong focus on delivering measurable results aligned to role requirements.",
        skills.join(", ")
    )
}

pub fn tailor_resume(resume: &ResumeData, job_description: &str) -> TailoredContent {
    TailoredContent {
        summary: fallback_summary(resume),
        skills: prioritize_skills(&resume.skills, job_description),
    }
}

/// Stepper order for the resume builder. Freshers lead with projects and
/// skills; experienced candidates lead with whatever they actually have.
pub fn suggest_section_order(candidate: CandidateType, resume: &ResumeData) -> Vec<String> {
    let has_experience = !resume.experience.is_empty();
    let has_projects = !resume.projects.is_empty();

    let order: Vec<&str> = match candidate {
        CandidateType::Fresher => vec![
            "Template",
            "Personal Details",
            "Summary",
            "Projects",
            "Skills",
            "Education",
            "Experience",
            "Achievements",
            "Hobbies",
        ],
        CandidateType::Experienced => vec![
            "Template",
            "Personal Details",
            "Summary",
            if has_experience || !has_projects {
                "Experience"
            } else {
                "Projects"
            },
            if has_projects { "Projects" } else { "Skills" },
            "Skills",
            "Education",
            "Achievements",
        ],
    };

    let mut seen = HashSet::new();
    order
        .into_iter()
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

//! ATS issue detector: a fixed rule table over the resume's required fields.
//!
//! Rules run in declaration order; each violated rule contributes one message
//! to the list for its severity, so output order is stable for a given input.

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

const MIN_SUMMARY_CHARS: usize = 40;
const MIN_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Likely to make an ATS reject or mis-parse the resume.
    Blocker,
    Warning,
    Recommendation,
}

/// One entry of the rule table.
pub struct AtsRule {
    pub severity: Severity,
    pub message: &'static str,
    pub violated: fn(&ResumeData) -> bool,
}

pub const ATS_RULES: &[AtsRule] = &[
    AtsRule {
        severity: Severity::Blocker,
        message: "Email address is missing",
        violated: |r| r.personal_details.email.is_empty(),
    },
    AtsRule {
        severity: Severity::Blocker,
        message: "Full name is missing",
        violated: |r| r.personal_details.full_name.is_empty(),
    },
    AtsRule {
        severity: Severity::Warning,
        message: "Phone number not provided",
        violated: |r| r.personal_details.phone.is_empty(),
    },
    AtsRule {
        severity: Severity::Warning,
        message: "Summary is too short. Aim for 2-3 impactful sentences.",
        violated: |r| r.summary.trim().chars().count() < MIN_SUMMARY_CHARS,
    },
    AtsRule {
        severity: Severity::Recommendation,
        message: "Add at least 8-12 relevant skills to pass keyword screens.",
        violated: |r| r.skills.len() < MIN_SKILLS,
    },
    AtsRule {
        severity: Severity::Warning,
        message: "No experience entries found. Include internships or projects.",
        violated: |r| r.experience.is_empty(),
    },
    AtsRule {
        severity: Severity::Recommendation,
        message: "Quantify impact in bullets (numbers, %s, time saved).",
        violated: |r| !r.experience.is_empty() && !experience_has_digit(r),
    },
    AtsRule {
        severity: Severity::Recommendation,
        message: "Add 1-2 strong projects highlighting relevant tech and impact.",
        violated: |r| r.projects.is_empty(),
    },
];

fn experience_has_digit(resume: &ResumeData) -> bool {
    resume
        .experience
        .iter()
        .any(|e| e.responsibilities.chars().any(|c| c.is_ascii_digit()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtsIssue {
    pub severity: Severity,
    pub message: &'static str,
}

/// Issues grouped by severity, in rule order within each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsIssueReport {
    pub blockers: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AtsIssueReport {
    #[cfg(test)]
    pub fn is_clean(&self) -> bool {
        self.blockers.is_empty() && self.warnings.is_empty() && self.recommendations.is_empty()
    }

    fn push(&mut self, issue: AtsIssue) {
        let bucket = match issue.severity {
            Severity::Blocker => &mut self.blockers,
            Severity::Warning => &mut self.warnings,
            Severity::Recommendation => &mut self.recommendations,
        };
        bucket.push(issue.message.to_string());
    }
}

/// Evaluates every rule and returns the violations in rule order.
pub fn evaluate_rules(resume: &ResumeData) -> Vec<AtsIssue> {
    ATS_RULES
        .iter()
        .filter(|rule| (rule.violated)(resume))
        .map(|rule| AtsIssue {
            severity: rule.severity,
            message: rule.message,
        })
        .collect()
}

pub fn detect_ats_issues(resume: &ResumeData) -> AtsIssueReport {
    let mut report = AtsIssueReport::default();
    for issue in evaluate_rules(resume) {
        report.push(issue);
    }
    report
}

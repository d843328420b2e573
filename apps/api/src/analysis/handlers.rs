use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::analysis::ats_issues::{detect_ats_issues, AtsIssueReport};
use crate::analysis::bullets::{optimize_bullets, weave_keywords, BulletSuggestion};
use crate::analysis::jd_parser::{is_parseable, parse_job_description, ParsedJobDescription};
use crate::analysis::keyword_gap::{analyze_keyword_gap, KeywordGapReport};
use crate::analysis::profile_import::{import_profile, is_importable, ImportedProfile};
use crate::analysis::readability::{analyze_readability, ReadabilityInsight};
use crate::analysis::tailor::{suggest_section_order, tailor_resume, CandidateType};
use crate::errors::AppError;
use crate::models::resume::{value_to_text, ExperienceEntry, ResumeData};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRequest {
    pub resume_data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeJdRequest {
    pub resume_data: Option<Value>,
    pub job_description: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseJdRequest {
    pub job_description: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizeBulletsRequest {
    pub experience: Option<Value>,
    pub job_description: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeaveKeywordsRequest {
    pub resume_data: Option<Value>,
    pub missing_keywords: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileImportRequest {
    pub profile_text: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionOrderRequest {
    #[serde(rename = "type")]
    pub kind: CandidateType,
    pub resume_data: Option<Value>,
}

#[derive(Serialize)]
pub struct ReadabilityResponse {
    pub results: Vec<ReadabilityInsight>,
}

#[derive(Serialize)]
pub struct BulletsResponse {
    pub bullets: Vec<BulletSuggestion>,
}

#[derive(Serialize)]
pub struct WeaveResponse {
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Serialize)]
pub struct TailorResponse {
    pub updated: Value,
}

#[derive(Serialize)]
pub struct SectionOrderResponse {
    pub order: Vec<String>,
}

/// A required input counts as absent when it is missing, `null` or `""`.
fn require_value(value: Option<Value>, message: &str) -> Result<Value, AppError> {
    match value {
        None | Some(Value::Null) => Err(AppError::Validation(message.to_string())),
        Some(Value::String(s)) if s.is_empty() => Err(AppError::Validation(message.to_string())),
        Some(v) => Ok(v),
    }
}

fn require_text(value: Option<Value>, message: &str) -> Result<String, AppError> {
    let text = require_value(value, message).map(|v| value_to_text(&v))?;
    if text.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(text)
}

fn optional_text(value: Option<Value>) -> String {
    value.as_ref().map(value_to_text).unwrap_or_default()
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// POST /api/v1/ai/keyword-gap
pub async fn handle_keyword_gap(
    Json(req): Json<ResumeJdRequest>,
) -> Result<Json<KeywordGapReport>, AppError> {
    let message = "resumeData and jobDescription are required";
    let resume = require_value(req.resume_data, message)?;
    let job_description = require_text(req.job_description, message)?;

    let report = analyze_keyword_gap(&resume, &job_description);
    debug!(
        coverage = report.coverage,
        matched = report.matched_keywords.len(),
        missing = report.missing_keywords.len(),
        "keyword gap computed"
    );
    Ok(Json(report))
}

/// POST /api/v1/ai/readability
pub async fn handle_readability(
    Json(req): Json<ResumeRequest>,
) -> Result<Json<ReadabilityResponse>, AppError> {
    let resume = require_value(req.resume_data, "resumeData is required")?;
    let results = analyze_readability(&ResumeData::from_value(&resume));
    debug!(blocks = results.len(), "readability computed");
    Ok(Json(ReadabilityResponse { results }))
}

/// POST /api/v1/ai/detect-ats-issues
pub async fn handle_detect_ats_issues(
    Json(req): Json<ResumeRequest>,
) -> Result<Json<AtsIssueReport>, AppError> {
    let resume = require_value(req.resume_data, "resumeData is required")?;
    let report = detect_ats_issues(&ResumeData::from_value(&resume));
    debug!(
        blockers = report.blockers.len(),
        warnings = report.warnings.len(),
        recommendations = report.recommendations.len(),
        "ats issues detected"
    );
    Ok(Json(report))
}

/// POST /api/v1/ai/parse-jd
pub async fn handle_parse_jd(
    Json(req): Json<ParseJdRequest>,
) -> Result<Json<ParsedJobDescription>, AppError> {
    let text = optional_text(req.job_description);
    if !is_parseable(&text) {
        debug!(chars = text.trim().chars().count(), "job description too short to parse");
        return Err(AppError::Validation(
            "Provide jobDescription text (min 30 chars)".to_string(),
        ));
    }

    let parsed = parse_job_description(&text);
    debug!(
        title = %parsed.title,
        skills = parsed.skills.len(),
        responsibilities = parsed.responsibilities.len(),
        "job description parsed"
    );
    Ok(Json(parsed))
}

/// POST /api/v1/ai/optimize-bullets
pub async fn handle_optimize_bullets(
    Json(req): Json<OptimizeBulletsRequest>,
) -> Json<BulletsResponse> {
    let experience = req
        .experience
        .map(|v| ResumeData::from_value(&json!({ "experience": v })).experience)
        .unwrap_or_default();
    let job_description = optional_text(req.job_description);

    let bullets = optimize_bullets(&experience, &job_description);
    debug!(bullets = bullets.len(), "bullets optimized");
    Json(BulletsResponse { bullets })
}

/// POST /api/v1/ai/weave-keywords
pub async fn handle_weave_keywords(Json(req): Json<WeaveKeywordsRequest>) -> Json<WeaveResponse> {
    let resume = req
        .resume_data
        .as_ref()
        .map(ResumeData::from_value)
        .unwrap_or_default();

    // A keyword list that is not an array leaves the bullets untouched; an
    // absent or empty one still normalizes them.
    let experience = match req.missing_keywords {
        Some(v) if !v.is_array() => resume.experience,
        missing => {
            let keywords = string_list(missing);
            debug!(keywords = keywords.len(), "weaving keywords");
            weave_keywords(&resume.experience, &keywords)
        }
    };
    debug!(entries = experience.len(), "keywords woven");
    Json(WeaveResponse { experience })
}

/// POST /api/v1/ai/import-linkedin
pub async fn handle_import_linkedin(
    Json(req): Json<ProfileImportRequest>,
) -> Result<Json<ImportedProfile>, AppError> {
    let text = optional_text(req.profile_text);
    if !is_importable(&text) {
        return Err(AppError::Validation(
            "Provide profileText (copy-pasted LinkedIn profile text)".to_string(),
        ));
    }

    let profile = import_profile(&text);
    debug!(
        skills = profile.skills.len(),
        experience = profile.experience.len(),
        education = profile.education.len(),
        "profile imported"
    );
    Ok(Json(profile))
}

/// POST /api/v1/ai/tailor-resume
///
/// Echoes the posted resume with `summary` and `skills` replaced; every other
/// field is returned exactly as sent.
pub async fn handle_tailor_resume(
    Json(req): Json<ResumeJdRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let message = "resumeData and jobDescription are required";
    let raw = require_value(req.resume_data, message)?;
    let job_description = require_text(req.job_description, message)?;

    let tailored = tailor_resume(&ResumeData::from_value(&raw), &job_description);
    debug!(skills = tailored.skills.len(), "resume tailored");

    let mut updated = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    updated.insert("summary".to_string(), Value::String(tailored.summary));
    updated.insert(
        "skills".to_string(),
        Value::Array(tailored.skills.into_iter().map(Value::String).collect()),
    );

    Ok(Json(TailorResponse {
        updated: Value::Object(updated),
    }))
}

/// POST /api/v1/ai/suggest-section-order
pub async fn handle_suggest_section_order(
    Json(req): Json<SectionOrderRequest>,
) -> Json<SectionOrderResponse> {
    let resume = req
        .resume_data
        .as_ref()
        .map(ResumeData::from_value)
        .unwrap_or_default();
    let order = suggest_section_order(req.kind, &resume);
    debug!(kind = ?req.kind, sections = order.len(), "section order suggested");
    Json(SectionOrderResponse { order })
}

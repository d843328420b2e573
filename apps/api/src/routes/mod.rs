pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analyzer API
        .route("/api/v1/ai/keyword-gap", post(handlers::handle_keyword_gap))
        .route("/api/v1/ai/readability", post(handlers::handle_readability))
        .route(
            "/api/v1/ai/detect-ats-issues",
            post(handlers::handle_detect_ats_issues),
        )
        .route("/api/v1/ai/parse-jd", post(handlers::handle_parse_jd))
        .route(
            "/api/v1/ai/import-linkedin",
            post(handlers::handle_import_linkedin),
        )
        // Rewrite helpers
        .route(
            "/api/v1/ai/optimize-bullets",
            post(handlers::handle_optimize_bullets),
        )
        .route(
            "/api/v1/ai/weave-keywords",
            post(handlers::handle_weave_keywords),
        )
        .route(
            "/api/v1/ai/tailor-resume",
            post(handlers::handle_tailor_resume),
        )
        .route(
            "/api/v1/ai/suggest-section-order",
            post(handlers::handle_suggest_section_order),
        )
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(path: &str, body: Value) -> Response {
        build_router()
            .oneshot(
                Request::post(path)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes")
    }

    async fn read_json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_keyword_gap_route_reports_coverage() {
        let response = post_json(
            "/api/v1/ai/keyword-gap",
            json!({
                "resumeData": {"skills": ["Node.js", "MongoDB"]},
                "jobDescription": "Looking for a Node.js developer with Express and MongoDB experience"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["coverage"], 40);
        assert!(payload["missingKeywords"]
            .as_array()
            .unwrap()
            .contains(&json!("express")));
    }

    #[tokio::test]
    async fn test_keyword_gap_route_requires_job_description() {
        let response = post_json(
            "/api/v1/ai/keyword-gap",
            json!({"resumeData": {}, "jobDescription": ""}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ats_route_rejects_missing_resume() {
        let response = post_json("/api/v1/ai/detect-ats-issues", json!({})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ats_route_accepts_empty_resume() {
        let response = post_json("/api/v1/ai/detect-ats-issues", json!({"resumeData": {}})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["blockers"][0], "Email address is missing");
        assert_eq!(payload["blockers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_readability_route_wraps_results() {
        let response = post_json(
            "/api/v1/ai/readability",
            json!({"resumeData": {"summary": "I am responsible for managing teams."}}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let first = &payload["results"][0];
        assert_eq!(first["section"], "Summary");
        assert_eq!(first["metrics"]["wordsPerSentence"], 6);
        assert_eq!(first["passiveVoice"], false);
    }

    #[tokio::test]
    async fn test_parse_jd_route_rejects_short_text() {
        let response = post_json("/api/v1/ai/parse-jd", json!({"jobDescription": "Rust"})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_jd_route_returns_fields() {
        let response = post_json(
            "/api/v1/ai/parse-jd",
            json!({"jobDescription": "Role: Senior Rust Engineer. Remote, full-time, building compilers."}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["title"], "Senior Rust Engineer");
        assert_eq!(payload["level"], "Senior");
        assert_eq!(payload["employmentType"], "full-time");
    }

    #[tokio::test]
    async fn test_import_linkedin_route_parses_profile() {
        let profile = "Ada Lovelace\nBackend engineer building payment rails\n\
            Skills: Rust, Kafka\nSenior Engineer at Acme (Present)";
        let response = post_json("/api/v1/ai/import-linkedin", json!({"profileText": profile})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["experience"][0]["company"], "Acme");
        assert_eq!(payload["experience"][0]["currentJob"], true);
        assert_eq!(payload["skills"], json!(["Skills", "Rust", "Kafka"]));
    }

    #[tokio::test]
    async fn test_import_linkedin_route_rejects_short_text() {
        let response = post_json("/api/v1/ai/import-linkedin", json!({"profileText": "too short"})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_section_order_route_defaults_to_experienced() {
        let response = post_json("/api/v1/ai/suggest-section-order", json!({})).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["order"][3], "Experience");
    }

    #[tokio::test]
    async fn test_health_route_reports_ok() {
        let response = build_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["service"], "ats-api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = post_json("/api/v1/ai/nope", json!({})).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"]["code"], "NOT_FOUND");
    }
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::review::handlers as review;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(render::handle_list_templates))
        // Resume API
        .route("/api/v1/resume/sample", get(review::handle_sample_resume))
        .route(
            "/api/v1/resume/completeness",
            post(review::handle_completeness),
        )
        // Render API
        .route("/api/v1/render/preview", post(render::handle_render_preview))
        .route("/api/v1/render/tree", post(render::handle_render_tree))
        // Export API
        .route(
            "/api/v1/export/estimate",
            post(export::handle_export_estimate),
        )
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::models::sample::sample_resume;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    async fn get_path(path: &str) -> Response {
        app()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(path: &str, body: Value) -> Response {
        app()
            .oneshot(
                Request::post(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get_path("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_lists_twelve_templates() {
        let body = json_body(get_path("/api/v1/templates").await).await;
        assert_eq!(body.as_array().unwrap().len(), 12);
        assert_eq!(body[0]["id"], "modern");
    }

    #[tokio::test]
    async fn test_sample_then_completeness() {
        let sample = json_body(get_path("/api/v1/resume/sample").await).await;
        assert_eq!(sample["personalInfo"]["fullName"], "Jordan Rivera");

        let response = post_json("/api/v1/resume/completeness", sample).await;
        assert_eq!(response.status(), StatusCode::OK);
        let report = json_body(response).await;
        assert!(report["overallScore"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_preview_returns_html_at_paper_width() {
        let response = post_json(
            "/api/v1/render/preview?paper=letter",
            json!({ "resume": sample_resume(), "template": "classic" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("width:816px"));
        assert!(html.contains("data-template=\"classic\""));
    }

    #[tokio::test]
    async fn test_tree_uses_default_template() {
        let response = post_json("/api/v1/render/tree", json!({ "resume": sample_resume() })).await;
        assert_eq!(response.status(), StatusCode::OK);
        let tree = json_body(response).await;
        assert_eq!(tree["template"], "modern");
        assert!(!tree["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_estimate_reports_pages() {
        let response = post_json(
            "/api/v1/export/estimate",
            json!({
                "resume": sample_resume(),
                "template": "compact",
                "options": { "paper": "legal", "breakMode": "slice" }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let estimate = json_body(response).await;
        assert_eq!(estimate["pageCount"], 1);
        assert_eq!(estimate["paper"], "legal");
        assert_eq!(estimate["breakMode"], "slice");
    }

    #[tokio::test]
    async fn test_export_pdf_attachment() {
        let response = post_json(
            "/api/v1/export/pdf",
            json!({ "resume": sample_resume(), "template": "compact" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jordan_Rivera_Resume.pdf\""
        );
        assert_eq!(headers["x-page-count"], "1");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_unknown_template_is_rejected() {
        let response = post_json(
            "/api/v1/export/pdf",
            json!({ "resume": sample_resume(), "template": "fancy" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(body["error"]["message"].as_str().unwrap().contains("fancy"));
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/render/tree")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"resume\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_width_excludes_margins() {
        let response = post_json(
            "/api/v1/render/preview?paper=a4&marginMm=25.4",
            json!({ "resume": sample_resume() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        // 793.7 px page less two 96 px margins
        assert!(html.contains("width:601.7"), "missing content width");
    }

    #[tokio::test]
    async fn test_preview_rejects_invalid_margin() {
        let response = post_json(
            "/api/v1/render/preview?marginMm=90",
            json!({ "resume": sample_resume() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_margin_is_validation_error() {
        let response = post_json(
            "/api/v1/export/estimate",
            json!({ "resume": sample_resume(), "options": { "marginMm": 80 } }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::embed::handlers as embed;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless document operations
        .route("/api/v1/resumes/new", get(resume::handle_new_resume))
        .route("/api/v1/resumes/normalize", post(resume::handle_normalize))
        .route("/api/v1/resumes/validate", post(resume::handle_validate))
        .route("/api/v1/resumes/preview", post(resume::handle_preview))
        .route("/api/v1/resumes/encode", post(resume::handle_encode))
        .route("/api/v1/resumes/decode", post(resume::handle_decode))
        .route(
            "/api/v1/resumes/export/json",
            post(resume::handle_export_json),
        )
        // Stored résumés and drafts
        .route("/api/v1/resumes", post(resume::handle_create_resume))
        .route("/api/v1/resumes/active", get(resume::handle_active_resume))
        .route(
            "/api/v1/resumes/:id",
            get(resume::handle_get_resume).put(resume::handle_put_resume),
        )
        .route(
            "/api/v1/drafts/:session",
            get(resume::handle_get_draft).put(resume::handle_put_draft),
        )
        // Embed surface
        .route("/api/v1/embed/url", post(embed::handle_embed_url))
        .route("/embed/:resume_id", get(embed::handle_embed))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::Config;
    use crate::resume::codec::encode;
    use crate::resume::model::create_empty_resume;
    use crate::storage::MemoryStore;

    fn test_app() -> Router {
        build_router(AppState {
            store: Arc::new(MemoryStore::new()),
            config: Config {
                redis_url: None,
                public_base_url: Url::parse("https://cv.example.com").unwrap(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&test_app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_resume() {
        let (status, body) = send(&test_app(), "GET", "/api/v1/resumes/new", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["version"], "1.0");
        assert_eq!(body["education"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_normalize_fills_defaults() {
        let (status, body) = send(
            &test_app(),
            "POST",
            "/api/v1/resumes/normalize",
            Some(json!({ "basics": { "name": "X" }, "meta": { "documentOptions": { "sectionOrder": ["skills"] } } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basics"]["name"], "X");
        assert_eq!(body["basics"]["email"], "");
        assert_eq!(body["meta"]["documentOptions"]["sectionOrder"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_validate_reports_findings() {
        let (status, body) = send(&test_app(), "POST", "/api/v1/resumes/validate", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&json!("meta: Required")));
        assert!(errors.contains(&json!("basics.name is required")));
        assert!(body["score"].as_u64().unwrap() < 100);
    }

    #[tokio::test]
    async fn test_preview_lists_visible_sections() {
        let (status, body) = send(
            &test_app(),
            "POST",
            "/api/v1/resumes/preview",
            Some(json!({
                "basics": { "name": "Jane Doe", "summary": "Builds things." },
                "projects": [{ "title": "Parser", "startDate": "2024-06" }, { "title": "" }],
                "meta": { "documentOptions": { "showSections": { "summary": false } } },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["header"]["name"], "Jane Doe");
        let sections = body["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["key"], "projects");
        assert_eq!(sections[0]["entries"].as_array().unwrap().len(), 1);
        assert_eq!(sections[0]["entries"][0]["dates"], "Jun 2024 - Present");
    }

    #[tokio::test]
    async fn test_encode_decode_round_trip() {
        let app = test_app();
        let mut resume = create_empty_resume();
        resume.basics.name = "Jane Doe".to_string();
        let input = serde_json::to_value(&resume).unwrap();

        let (status, body) = send(&app, "POST", "/api/v1/resumes/encode", Some(input.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(token, encode(&resume));

        let (status, body) = send(&app, "POST", "/api/v1/resumes/decode", Some(json!({ "token": token }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, input);
    }

    #[tokio::test]
    async fn test_decode_invalid_token_returns_422() {
        let (status, body) = send(
            &test_app(),
            "POST",
            "/api/v1/resumes/decode",
            Some(json!({ "token": "not-valid-base64!!" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_export_json_headers() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/export/json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "basics": { "name": "Jane Doe" } }).to_string()))
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe.json\""
        );
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("{\n  \"meta\""));
    }

    #[tokio::test]
    async fn test_stored_resume_lifecycle() {
        let app = test_app();

        let (status, _) = send(&app, "GET", "/api/v1/resumes/active", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/resumes",
            Some(json!({ "basics": { "name": "Jane Doe" } })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let resume_id = body["resumeId"].as_str().unwrap().to_string();
        assert_eq!(
            body["embedUrl"],
            format!("https://cv.example.com/embed/{resume_id}")
        );
        assert!(body["snippet"].as_str().unwrap().contains("CVEmbed.render"));

        let portable_url = body["portableUrl"].as_str().unwrap().to_string();
        assert!(portable_url.starts_with("https://cv.example.com/embed/portable?data="));
        assert_eq!(
            body["iframeSnippet"],
            format!(
                "<iframe src=\"{portable_url}\" width=\"100%\" height=\"1100\" frameborder=\"0\"></iframe>"
            )
        );
        let portable_path = portable_url.trim_start_matches("https://cv.example.com");
        let (status, body) = send(&app, "GET", portable_path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["basics"]["name"], "Jane Doe");

        let (status, body) = send(&app, "GET", &format!("/api/v1/resumes/{resume_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basics"]["name"], "Jane Doe");

        let (_, body) = send(&app, "GET", "/api/v1/resumes/active", None).await;
        assert_eq!(body["resumeId"], resume_id.as_str());

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/resumes/{resume_id}"),
            Some(json!({ "basics": { "name": "Jane Q. Doe" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basics"]["name"], "Jane Q. Doe");

        let (status, body) = send(&app, "GET", &format!("/embed/{resume_id}?density=compact&showDownload=0"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["basics"]["name"], "Jane Q. Doe");
        assert_eq!(body["density"], "compact");
        assert_eq!(body["showDownload"], false);
        assert_eq!(body["primaryColor"], "#111111");
        assert_eq!(body["validation"]["valid"], false);
        assert_eq!(body["preview"]["header"]["name"], "Jane Q. Doe");
    }

    #[tokio::test]
    async fn test_unknown_resume_and_bad_id() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/api/v1/resumes/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/api/v1/resumes/a:b", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_drafts() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/api/v1/drafts/tab-1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/drafts/tab-1",
            Some(json!({ "basics": { "headline": "Draft" } })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/api/v1/drafts/tab-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basics"]["headline"], "Draft");
    }

    #[tokio::test]
    async fn test_portable_embed() {
        let app = test_app();
        let mut resume = create_empty_resume();
        resume.basics.name = "X".to_string();
        let uri = format!("/embed/portable?data={}&primaryColor=%23ff0000", encode(&resume));

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["basics"]["name"], "X");
        assert_eq!(body["primaryColor"], "#ff0000");
        assert_eq!(body["showDownload"], true);
        assert_eq!(body["density"], "normal");

        let (status, body) = send(&app, "GET", "/embed/portable", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_embed_url_endpoint() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/embed/url",
            Some(json!({ "resumeId": "abc", "theme": { "density": "compact" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://cv.example.com/embed/abc?density=compact");

        let (status, _) = send(&app, "POST", "/api/v1/embed/url", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/embed/url",
            Some(json!({ "resumeId": "abc", "theme": { "density": "relaxed" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://cv.example.com/embed/abc?density=normal");

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/embed/url",
            Some(json!({ "resumeId": "active" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_route_names_are_not_resume_ids() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/v1/resumes/portable", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/resumes/portable",
            Some(json!({ "basics": { "name": "X" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/v1/resumes/active", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

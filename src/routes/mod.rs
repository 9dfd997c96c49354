//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket chat at `/ws`
/// - JSON API under `/api/v1/...`
/// - Static SPA from the configured directory with index fallback (client-side routes)
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_files.dir.clone();
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let static_service = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(index));

    let api = Router::new()
        .route("/health", get(http::http_health))
        .route("/routes", get(http::http_routes))
        .route("/pages", get(http::http_get_page))
        // Assessments
        .route("/assessments", get(http::http_list_assessments).post(http::http_create_assessment))
        .route(
            "/assessments/:id",
            get(http::http_get_assessment)
                .patch(http::http_update_assessment)
                .delete(http::http_delete_assessment),
        )
        .route("/assessments/:id/questions", get(http::http_question_order))
        // Drafts
        .route("/drafts", post(http::http_open_draft))
        .route(
            "/drafts/:id",
            get(http::http_get_draft).patch(http::http_patch_draft).delete(http::http_discard_draft),
        )
        .route("/drafts/:id/questions", post(http::http_add_question))
        .route(
            "/drafts/:id/questions/:qid",
            put(http::http_edit_question).delete(http::http_delete_question),
        )
        .route("/drafts/:id/questions/:qid/options", post(http::http_add_option))
        .route(
            "/drafts/:id/questions/:qid/options/:index",
            put(http::http_set_option).delete(http::http_remove_option),
        )
        .route("/drafts/:id/commit", post(http::http_commit_draft))
        // Chat
        .route("/chat/messages", get(http::http_chat_history).post(http::http_chat_send))
        // Submissions
        .route("/submissions", get(http::http_list_submissions))
        .route("/submissions/stats", get(http::http_submission_stats))
        .route("/submissions/:id/grade", put(http::http_set_grade))
        .route("/submissions/:id/feedback", put(http::http_set_feedback))
        // Quiz generator
        .route("/quiz", get(http::http_get_quiz).patch(http::http_patch_quiz))
        .route("/quiz/tags", post(http::http_add_quiz_tag))
        .route("/quiz/tags/:tag", axum::routing::delete(http::http_remove_quiz_tag))
        .route("/quiz/generate", post(http::http_generate_quiz));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;

    fn app() -> Router {
        build_router(Arc::new(AppState::with_config(AppConfig::default())))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_and_routes() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (_, body) = call(&app, Method::GET, "/api/v1/routes", None).await;
        assert_eq!(body["routes"].as_array().unwrap().len(), 9);
        assert_eq!(body["navbar"][0]["path"], "/");
    }

    #[tokio::test]
    async fn test_page_dispatch() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/pages?path=/quiz/generate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "quiz_generator");
        assert_eq!(body["data"]["maxQuestions"], 20);

        let (status, body) = call(&app, Method::GET, "/api/v1/pages?path=/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("/missing"));
    }

    #[tokio::test]
    async fn test_assessment_create_and_delete() {
        let app = app();
        let form = json!({ "title": "Essay 1", "description": "", "type": "assignment", "dueDate": "2024-06-01" });
        let (status, created) = call(&app, Method::POST, "/api/v1/assessments", Some(form)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Essay 1");
        assert_eq!(created["dueDate"], "2024-06-01");

        let (_, list) = call(&app, Method::GET, "/api/v1/assessments", None).await;
        assert_eq!(list.as_array().unwrap().len(), 3);

        let uri = format!("/api/v1/assessments/{}", created["id"].as_str().unwrap());
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = call(&app, Method::GET, "/api/v1/assessments", None).await;
        let titles: Vec<_> = list.as_array().unwrap().iter().map(|a| a["title"].clone()).collect();
        assert_eq!(titles, vec![json!("React Fundamentals Quiz"), json!("Project Phase 1")]);
    }

    #[tokio::test]
    async fn test_patch_assessment() {
        let app = app();
        let (status, body) =
            call(&app, Method::PATCH, "/api/v1/assessments/2", Some(json!({ "status": "published" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "published");
        assert_eq!(body["title"], "Project Phase 1");
    }

    #[tokio::test]
    async fn test_draft_flow_over_http() {
        let app = app();
        let (status, draft) = call(&app, Method::POST, "/api/v1/drafts", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let draft_id = draft["id"].as_str().unwrap().to_string();
        let base = format!("/api/v1/drafts/{draft_id}");

        call(&app, Method::PATCH, &base, Some(json!({ "title": "Fractions" }))).await;
        let (_, q) = call(&app, Method::POST, &format!("{base}/questions"), Some(json!({ "type": "multiple-choice" }))).await;
        let qid = q["id"].as_str().unwrap().to_string();
        assert_eq!(q["options"].as_array().unwrap().len(), 4);

        let (status, q) = call(
            &app,
            Method::PUT,
            &format!("{base}/questions/{qid}/options/1"),
            Some(json!({ "text": "1/2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(q["options"], json!(["", "1/2", "", ""]));

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("{base}/questions/{qid}/options/9"),
            Some(json!({ "text": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, saved) = call(&app, Method::POST, &format!("{base}/commit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["title"], "Fractions");
        assert_eq!(saved["questions"][0]["options"][1], "1/2");

        let (status, _) = call(&app, Method::GET, &base, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_question_body_without_id_uses_path() {
        let app = app();
        let (_, draft) = call(&app, Method::POST, "/api/v1/drafts", None).await;
        let base = format!("/api/v1/drafts/{}", draft["id"].as_str().unwrap());
        let (_, q) = call(&app, Method::POST, &format!("{base}/questions"), Some(json!({ "type": "essay" }))).await;
        let qid = q["id"].as_str().unwrap().to_string();

        let body = json!({ "type": "essay", "question": "Describe osmosis", "points": 3, "required": false });
        let (status, edited) = call(&app, Method::PUT, &format!("{base}/questions/{qid}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited["id"], qid.as_str());
        assert_eq!(edited["question"], "Describe osmosis");
        assert_eq!(edited["points"], 3);
    }

    #[tokio::test]
    async fn test_chat_blank_is_rejected() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/v1/chat/messages", Some(json!({ "text": "  " }))).await;
        assert_eq!(body["accepted"], false);
        let (_, history) = call(&app, Method::GET, "/api/v1/chat/messages", None).await;
        assert_eq!(history.as_array().unwrap().len(), 1);

        let (_, body) = call(&app, Method::POST, "/api/v1/chat/messages", Some(json!({ "text": "hello" }))).await;
        assert_eq!(body["accepted"], true);
        assert_eq!(body["message"]["sender"], "user");
    }

    #[tokio::test]
    async fn test_grading_endpoints() {
        let app = app();
        let (_, s) = call(&app, Method::PUT, "/api/v1/submissions/2/grade", Some(json!({ "grade": 2 }))).await;
        assert_eq!(s["grade"], 2);
        let (_, stats) = call(&app, Method::GET, "/api/v1/submissions/stats", None).await;
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["passRate"], 50.0);
        let (status, _) = call(&app, Method::PUT, "/api/v1/submissions/7/feedback", Some(json!({ "feedback": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_quiz_endpoints() {
        let app = app();
        let (status, _) = call(&app, Method::POST, "/api/v1/quiz/generate", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        call(&app, Method::PATCH, "/api/v1/quiz", Some(json!({ "topic": "Photosynthesis", "questionCount": 8 }))).await;
        call(&app, Method::POST, "/api/v1/quiz/tags", Some(json!({ "tag": "biology" }))).await;
        let (_, form) = call(&app, Method::POST, "/api/v1/quiz/tags", Some(json!({ "tag": "plants" }))).await;
        assert_eq!(form["tags"], json!(["biology", "plants"]));
        let (_, form) = call(&app, Method::DELETE, "/api/v1/quiz/tags/biology", None).await;
        assert_eq!(form["tags"], json!(["plants"]));

        let (status, body) = call(&app, Method::POST, "/api/v1/quiz/generate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], true);
        assert_eq!(body["request"]["questionCount"], 8);
    }
}

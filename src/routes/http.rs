//! HTTP endpoint handlers. These are thin wrappers that forward to state methods.
//! Each handler is instrumented; failures surface as `AppError` JSON responses.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{AssessmentForm, AssessmentPatch, Question};
use crate::error::AppResult;
use crate::pages::{dispatch, navbar, route_table};
use crate::protocol::*;
use crate::quiz::QuizPatch;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

pub async fn http_routes() -> impl IntoResponse {
    Json(RoutesOut { routes: route_table(), navbar: navbar() })
}

#[instrument(level = "info", skip(state), fields(path = %q.path))]
pub async fn http_get_page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(dispatch(&q.path, &state).await?))
}

//
// Assessments
//

pub async fn http_list_assessments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.list_assessments().await)
}

#[instrument(level = "info", skip(state, form), fields(title = %form.title))]
pub async fn http_create_assessment(
    State(state): State<Arc<AppState>>,
    Json(form): Json<AssessmentForm>,
) -> impl IntoResponse {
    let a = state.create_assessment(form).await;
    (StatusCode::CREATED, Json(a))
}

pub async fn http_get_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.get_assessment(&id).await?))
}

#[instrument(level = "info", skip(state, patch))]
pub async fn http_update_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<AssessmentPatch>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.update_assessment(&id, patch).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.delete_assessment(&id).await?))
}

pub async fn http_question_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.question_order(&id).await?))
}

//
// Drafts
//

#[instrument(level = "info", skip(state, body))]
pub async fn http_open_draft(
    State(state): State<Arc<AppState>>,
    body: Option<Json<OpenDraftIn>>,
) -> AppResult<impl IntoResponse> {
    // An empty body opens a blank draft.
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let draft = state.open_draft(body.assessment_id.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

pub async fn http_get_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.get_draft(id).await?))
}

pub async fn http_patch_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AssessmentPatch>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.patch_draft(id, patch).await?))
}

pub async fn http_discard_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.discard_draft(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(kind = ?body.kind))]
pub async fn http_add_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddQuestionIn>,
) -> AppResult<impl IntoResponse> {
    let q = state.add_question(id, body.kind).await?;
    Ok((StatusCode::CREATED, Json(q)))
}

pub async fn http_edit_question(
    State(state): State<Arc<AppState>>,
    Path((id, question_id)): Path<(Uuid, String)>,
    Json(mut question): Json<Question>,
) -> AppResult<impl IntoResponse> {
    // Path wins over whatever id the body carries.
    question.id = question_id;
    Ok(Json(state.edit_question(id, question).await?))
}

pub async fn http_delete_question(
    State(state): State<Arc<AppState>>,
    Path((id, question_id)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.delete_question(id, &question_id).await?))
}

pub async fn http_set_option(
    State(state): State<Arc<AppState>>,
    Path((id, question_id, index)): Path<(Uuid, String, usize)>,
    Json(body): Json<OptionIn>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.set_option(id, &question_id, index, body.text).await?))
}

pub async fn http_add_option(
    State(state): State<Arc<AppState>>,
    Path((id, question_id)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.add_option(id, &question_id).await?))
}

pub async fn http_remove_option(
    State(state): State<Arc<AppState>>,
    Path((id, question_id, index)): Path<(Uuid, String, usize)>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.remove_option(id, &question_id, index).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_commit_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.commit_draft(id).await?))
}

//
// Chat
//

pub async fn http_chat_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.chat_history().await)
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_chat_send(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatIn>,
) -> impl IntoResponse {
    let message = state.send_chat(&body.text).await;
    info!(target: "chat", accepted = message.is_some(), "HTTP chat send");
    Json(ChatOut { accepted: message.is_some(), message })
}

//
// Submissions
//

pub async fn http_list_submissions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.list_submissions().await)
}

pub async fn http_submission_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.submission_stats().await)
}

#[instrument(level = "info", skip(state, body), fields(grade = body.grade))]
pub async fn http_set_grade(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(body): Json<GradeIn>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.set_grade(id, body.grade).await?))
}

pub async fn http_set_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(body): Json<FeedbackIn>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.set_feedback(id, body.feedback).await?))
}

//
// Quiz generator
//

pub async fn http_get_quiz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.quiz_form().await)
}

pub async fn http_patch_quiz(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<QuizPatch>,
) -> impl IntoResponse {
    Json(state.patch_quiz(patch).await)
}

pub async fn http_add_quiz_tag(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TagIn>,
) -> impl IntoResponse {
    Json(state.add_quiz_tag(&body.tag).await)
}

pub async fn http_remove_quiz_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> impl IntoResponse {
    Json(state.remove_quiz_tag(&tag).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_generate_quiz(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    Ok(Json(state.generate_quiz().await?))
}

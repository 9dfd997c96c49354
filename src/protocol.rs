//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Message, QuestionType};
use crate::pages::{NavLink, RouteEntry};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Send { text: String },
    History,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Message { message: Message },
    History { messages: Vec<Message> },
    Error { message: String },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct RoutesOut {
    pub routes: Vec<RouteEntry>,
    pub navbar: Vec<NavLink>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDraftIn {
    #[serde(default)]
    pub assessment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionIn {
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
}

#[derive(Debug, Deserialize)]
pub struct OptionIn {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    pub text: String,
}

/// `message` is absent when the text was blank and nothing was appended.
#[derive(Debug, Serialize)]
pub struct ChatOut {
    pub accepted: bool,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct GradeIn {
    pub grade: u8,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackIn {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct TagIn {
    pub tag: String,
}

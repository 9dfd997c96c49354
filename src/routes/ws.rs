//! WebSocket upgrade + live chat loop. Client messages are parsed as JSON and
//! dispatched; every transcript append (including delayed replies) is pushed
//! to the client as it happens.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsFrame, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, instrument, warn};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!(target: "edu_assistant", "WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send_json(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
    let out = serde_json::to_string(msg).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
    });
    match socket.send(WsFrame::Text(out)).await {
        Ok(()) => true,
        Err(e) => {
            error!(target: "edu_assistant", error = %e, "WS send error");
            false
        }
    }
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!(target: "edu_assistant", "WebSocket connected");
    let mut feed = state.transcript.read().await.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let Some(Ok(frame)) = incoming else { break };
                match frame {
                    WsFrame::Text(txt) => {
                        let reply = match serde_json::from_str::<ClientWsMessage>(&txt) {
                            Ok(msg) => {
                                debug!(target: "edu_assistant", "WS received: {:?}", &msg);
                                handle_client_ws(msg, &state).await
                            }
                            Err(e) => Some(ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }),
                        };
                        if let Some(reply) = reply {
                            if !send_json(&mut socket, &reply).await {
                                break;
                            }
                        }
                    }
                    WsFrame::Ping(payload) => {
                        let _ = socket.send(WsFrame::Pong(payload)).await;
                    }
                    WsFrame::Close(_) => break,
                    _ => {}
                }
            }
            appended = feed.recv() => {
                match appended {
                    Ok(message) => {
                        if !send_json(&mut socket, &ServerWsMessage::Message { message }).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "chat", skipped, "WS subscriber lagged; client should re-request history");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
    info!(target: "edu_assistant", "WebSocket disconnected");
}

/// Appends arrive through the transcript feed, so `send` has no direct reply
/// unless the text was blank.
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> Option<ServerWsMessage> {
    match msg {
        ClientWsMessage::Ping => Some(ServerWsMessage::Pong),
        ClientWsMessage::History => Some(ServerWsMessage::History { messages: state.chat_history().await }),
        ClientWsMessage::Send { text } => match state.send_chat(&text).await {
            Some(_) => None,
            None => Some(ServerWsMessage::Error { message: "Message text is empty".into() }),
        },
    }
}

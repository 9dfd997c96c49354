//! Edu Assistant · Dashboard Backend
//!
//! - Axum HTTP + WebSocket API for the teacher/student dashboard
//! - In-memory assessment builder, chat transcript, grading and quiz forms
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   EDU_CONFIG_PATH : path to TOML config (chat reply, quiz limits, static dir)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod assessments;
mod chat;
mod config;
mod domain;
mod error;
mod grading;
mod pages;
mod protocol;
mod quiz;
mod routes;
mod seeds;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let state = Arc::new(AppState::new());
    let app = build_router(state);

    let addr: SocketAddr = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    let listener = TcpListener::bind(addr).await?;
    info!(target: "edu_assistant", %addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(target: "edu_assistant", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "edu_assistant", error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

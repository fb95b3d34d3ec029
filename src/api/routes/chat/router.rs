//! Router for the chat API

use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;
use crate::api::utils::submit_to_session;
use crate::session::SessionState;

type SharedState = Arc<RwLock<AppState>>;

/// Get the state and transcript of a live session
async fn chat_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let handle = state
        .write()
        .map_err(|_| anyhow!("Unable to write shared state"))?
        .find_session(&id);

    let Some(handle) = handle else {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Chat session {} not found", id),
        )
            .into_response());
    };

    // A held lock means a submission is running
    let resp = match handle.try_lock() {
        Ok(transcript) => public::ChatTranscriptResponse {
            state: SessionState::Idle,
            transcript: Some(transcript.messages().to_vec()),
        },
        Err(_) => public::ChatTranscriptResponse {
            state: SessionState::Processing,
            transcript: None,
        },
    };
    Ok(Json(resp).into_response())
}

/// Ask a question in a session and get the reply with related videos
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let exchange = submit_to_session(&state, &payload.session_id, &payload.message).await?;

    let Some(exchange) = exchange else {
        return Ok((StatusCode::BAD_REQUEST, "Message must not be empty").into_response());
    };

    let resp = public::ChatResponse::new(&payload.session_id, &exchange);
    Ok(Json(resp).into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/{id}", get(chat_session))
}

//! Router for the widget's HTML page

use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
};
use uuid::Uuid;

use super::public;
use crate::api::state::AppState;
use crate::api::templates::Page;
use crate::api::utils::submit_to_session;

type SharedState = Arc<RwLock<AppState>>;

fn render(
    state: &SharedState,
    view: &public::PageView,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let shared_state = state
        .read()
        .map_err(|_| anyhow!("Unable to read shared state"))?;
    let html = shared_state
        .templates
        .render(&Page::Chat.to_string(), view)?;
    Ok(Html(html))
}

/// Show a fresh page, which starts a new session
async fn index(
    State(state): State<SharedState>,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let view = public::PageView {
        session_id: Uuid::new_v4().to_string(),
        exchange: None,
    };
    render(&state, &view)
}

/// Handle a form submission and re-render the page
async fn ask(
    State(state): State<SharedState>,
    Form(form): Form<public::AskForm>,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let session_id = if form.session_id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        form.session_id
    };

    let exchange = submit_to_session(&state, &session_id, &form.message).await?;

    let view = public::PageView {
        session_id,
        exchange: exchange.as_ref().map(public::ExchangeView::from),
    };
    render(&state, &view)
}

/// End the session and start over
async fn reset(
    State(state): State<SharedState>,
    Form(form): Form<public::ResetForm>,
) -> Result<Redirect, crate::api::public::ApiError> {
    let ended = state
        .write()
        .map_err(|_| anyhow!("Unable to write shared state"))?
        .end_session(&form.session_id);
    tracing::debug!("Reset session {} (existed: {})", form.session_id, ended);
    Ok(Redirect::to("/"))
}

/// Create the page router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index).post(ask))
        .route("/reset", post(reset))
}

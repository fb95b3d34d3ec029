use std::sync::{Arc, RwLock};

use anyhow::{Error, Result, anyhow};

use crate::api::state::AppState;
use crate::session::{Exchange, submit};

type SharedState = Arc<RwLock<AppState>>;

/// Run one submission against the session's transcript. The work is
/// spawned so that a client hanging up mid-request can't leave the
/// session half updated.
pub async fn submit_to_session(
    state: &SharedState,
    session_id: &str,
    input: &str,
) -> Result<Option<Exchange>, Error> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let (handle, services) = {
        let mut shared_state = state
            .write()
            .map_err(|_| anyhow!("Unable to write shared state"))?;
        (shared_state.session(session_id), shared_state.services.clone())
    };

    let input = input.to_string();
    let exchange = tokio::spawn(async move {
        let mut transcript = handle.lock().await;
        let (updated, exchange) =
            submit(transcript.clone(), &input, &services.chat, &services.videos).await;
        *transcript = updated;
        exchange
    })
    .await?;

    Ok(exchange)
}

//! Public types for the HTML page
use serde::{Deserialize, Serialize};

use crate::api::routes::chat::public::VideoLink;
use crate::session::Exchange;

/// Fields posted by the page's form
#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ExchangeView {
    pub question: String,
    pub answer: String,
    pub errors: Vec<String>,
    pub videos: Vec<VideoLink>,
}

impl From<&Exchange> for ExchangeView {
    fn from(exchange: &Exchange) -> Self {
        Self {
            question: exchange.user.content.clone(),
            answer: exchange.assistant.content.clone(),
            errors: exchange.errors.clone(),
            videos: exchange.videos.iter().map(VideoLink::from).collect(),
        }
    }
}

/// Everything the page template needs
#[derive(Serialize)]
pub struct PageView {
    pub session_id: String,
    pub exchange: Option<ExchangeView>,
}

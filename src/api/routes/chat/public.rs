//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::google::VideoResult;
use crate::openai::Message;
use crate::session::{Exchange, SessionState};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoLink {
    pub title: String,
    pub video_id: String,
    pub url: String,
}

impl From<&VideoResult> for VideoLink {
    fn from(video: &VideoResult) -> Self {
        Self {
            title: video.title.clone(),
            video_id: video.video_id.clone(),
            url: video.url(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub videos: Vec<VideoLink>,
    pub errors: Vec<String>,
}

impl ChatResponse {
    pub fn new(session_id: &str, exchange: &Exchange) -> Self {
        Self {
            session_id: session_id.to_string(),
            reply: exchange.assistant.content.clone(),
            videos: exchange.videos.iter().map(VideoLink::from).collect(),
            errors: exchange.errors.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatTranscriptResponse {
    pub state: SessionState,
    /// Left out while a submission is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<Message>>,
}

//! One conversation with the widget: the transcript and the
//! submission cycle that grows it.

use serde::{Deserialize, Serialize};

use crate::google::{VideoClient, VideoResult};
use crate::openai::{ChatClient, Message, Role};

/// Ordered user and assistant turns for a session. Only grows by a
/// whole exchange at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn append_exchange(&mut self, user: Message, assistant: Message) {
        self.0.push(user);
        self.0.push(assistant);
    }

    /// The history to send for `user`: everything so far followed by
    /// the new, unanswered message.
    fn with_pending(&self, user: &Message) -> Vec<Message> {
        let mut history = self.0.clone();
        history.push(user.clone());
        history
    }
}

/// Whether a session is free to take a submission. A session is
/// `Processing` while a submission holds its transcript.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Processing,
}

/// Everything produced by one submission, ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Exchange {
    pub user: Message,
    pub assistant: Message,
    pub videos: Vec<VideoResult>,
    pub errors: Vec<String>,
}

/// Handle one form submission. Blank input leaves the transcript
/// untouched and produces nothing to render.
///
/// The chat completion and the video search don't depend on each
/// other so they run concurrently. Neither can fail the submission:
/// the transcript always gains the user message followed by either
/// the reply or the fallback apology.
pub async fn submit(
    mut transcript: Transcript,
    input: &str,
    chat: &ChatClient,
    videos: &VideoClient,
) -> (Transcript, Option<Exchange>) {
    if input.trim().is_empty() {
        return (transcript, None);
    }

    let user = Message::new(Role::User, input);
    let history = transcript.with_pending(&user);

    let (reply, found) = tokio::join!(chat.complete(&history), videos.search(input));

    let errors = [&reply.error, &found.error]
        .into_iter()
        .flatten()
        .map(|e| e.to_string())
        .collect();

    let assistant = Message::new(Role::Assistant, &reply.value);
    transcript.append_exchange(user.clone(), assistant.clone());

    let exchange = Exchange {
        user,
        assistant,
        videos: found.value,
        errors,
    };
    (transcript, Some(exchange))
}

use std::time::Duration;

use crate::core::{AdapterError, AppConfig, Outcome, Service};
use crate::openai::{Message, Role, completion};

/// What the user sees when the chat endpoint can't produce a reply.
pub const FALLBACK_REPLY: &str = "Sorry, I am having trouble understanding you right now.";

/// A chat client for an OpenAI compatible completion API.
///
/// Use `ChatClient::initialize` at startup so that a bad key stops
/// the process before any page is served. `ChatClient::new` skips the
/// probe and is only useful when the key is known to be good.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_hostname: String,
    api_key: String,
    model: String,
    system_message: Option<Message>,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(config: &AppConfig) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdapterError::Unreachable {
                service: Service::Chat,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_hostname: config.chat_api_hostname.clone(),
            api_key: config.credentials.chat_api_key.clone(),
            model: config.chat_model.clone(),
            system_message: config
                .system_message
                .as_deref()
                .map(|msg| Message::new(Role::System, msg)),
            timeout: config.request_timeout,
        })
    }

    /// Build the client and send a throwaway completion to check the
    /// key is accepted.
    pub async fn initialize(config: &AppConfig) -> Result<Self, AdapterError> {
        let chat = Self::new(config)?;
        let probe = vec![Message::new(Role::System, "hello")];

        chat.send(&probe)
            .await
            .map_err(AdapterError::into_probe_failure)?;

        tracing::info!("Chat client ready using model {}", chat.model);
        Ok(chat)
    }

    /// Get the assistant's next message for `history`, which must
    /// already end with the user's latest message. Degrades to
    /// `FALLBACK_REPLY` on any failure.
    pub async fn complete(&self, history: &[Message]) -> Outcome<String> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if let Some(system) = &self.system_message {
            messages.push(system.clone());
        }
        messages.extend_from_slice(history);

        match self.send(&messages).await {
            Ok(content) => Outcome::ok(content),
            Err(e) => {
                tracing::warn!("Chat completion failed: {}", e);
                Outcome::degraded(FALLBACK_REPLY.to_string(), e)
            }
        }
    }

    async fn send(&self, messages: &[Message]) -> Result<String, AdapterError> {
        completion(
            &self.client,
            messages,
            &self.api_hostname,
            &self.api_key,
            &self.model,
            self.timeout,
        )
        .await
    }
}

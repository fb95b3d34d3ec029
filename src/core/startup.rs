//! Everything that has to succeed before the first page is served.

use crate::core::{AdapterError, AppConfig};
use crate::google::VideoClient;
use crate::openai::ChatClient;

#[derive(Clone)]
pub struct Services {
    pub chat: ChatClient,
    pub videos: VideoClient,
}

impl Services {
    /// Probe both APIs with the configured keys. Any error here is
    /// fatal.
    pub async fn initialize(config: &AppConfig) -> Result<Self, AdapterError> {
        let chat = ChatClient::initialize(config).await?;
        let videos = VideoClient::initialize(config).await?;
        Ok(Self { chat, videos })
    }

    /// Build the clients without probing.
    pub fn new(config: &AppConfig) -> Result<Self, AdapterError> {
        Ok(Self {
            chat: ChatClient::new(config)?,
            videos: VideoClient::new(config)?,
        })
    }
}

/// Load the config and bring up both clients, stopping at the first
/// failure. A missing key fails before any request is made.
pub async fn startup<F>(lookup: F) -> Result<(AppConfig, Services), AdapterError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = AppConfig::from_lookup(lookup)?;
    let services = Services::initialize(&config).await?;
    Ok((config, services))
}

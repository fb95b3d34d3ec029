//! YouTube Data API v3 client for finding videos related to a
//! question.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AdapterError, AppConfig, Outcome, Service};

pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";
pub const MAX_RESULTS: usize = 5;

// Google Developers channel, used to check the key works
const PROBE_CHANNEL_ID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";
const INVALID_KEY_REASON: &str = "keyInvalid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub title: String,
    pub video_id: String,
}

impl VideoResult {
    pub fn url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.video_id)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: Option<SearchItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

impl SearchResponse {
    fn into_results(self) -> Vec<VideoResult> {
        self.items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.and_then(|id| id.video_id)?;
                let title = item
                    .snippet
                    .map(|s| s.title)
                    .unwrap_or_else(|| video_id.clone());
                Some(VideoResult { title, video_id })
            })
            .take(MAX_RESULTS)
            .collect()
    }
}

// Error bodies look like:
// {
//   "error": {
//     "code": 400,
//     "message": "API key not valid. Please pass a valid API key.",
//     "errors": [{"message": "...", "domain": "global", "reason": "keyInvalid"}]
//   }
// }
fn is_invalid_key(body: &str) -> bool {
    if let Ok(parsed) = serde_json::from_str::<Value>(body)
        && let Some(errors) = parsed["error"]["errors"].as_array()
        && errors
            .iter()
            .any(|e| e["reason"].as_str() == Some(INVALID_KEY_REASON))
    {
        return true;
    }
    body.contains(INVALID_KEY_REASON)
}

fn request_failed(message: impl ToString) -> AdapterError {
    AdapterError::RequestFailed {
        service: Service::Video,
        message: message.to_string(),
    }
}

#[derive(Clone)]
pub struct VideoClient {
    client: Client,
    api_hostname: String,
    api_key: String,
    timeout: Duration,
}

impl VideoClient {
    pub fn new(config: &AppConfig) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdapterError::Unreachable {
                service: Service::Video,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_hostname: config.video_api_hostname.clone(),
            api_key: config.credentials.video_api_key.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Build the client and look up a known channel to check the key
    /// is accepted.
    pub async fn initialize(config: &AppConfig) -> Result<Self, AdapterError> {
        let videos = Self::new(config)?;
        videos
            .get("channels", &[("part", "snippet"), ("id", PROBE_CHANNEL_ID)])
            .await
            .map_err(AdapterError::into_probe_failure)?;

        tracing::info!("YouTube client ready");
        Ok(videos)
    }

    /// Find up to `MAX_RESULTS` videos for `query` in the order
    /// YouTube ranks them. Degrades to an empty list on failure.
    pub async fn search(&self, query: &str) -> Outcome<Vec<VideoResult>> {
        let max_results = MAX_RESULTS.to_string();
        let params = [
            ("part", "id,snippet"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("q", query),
        ];

        let result = self.get("search", &params).await.and_then(|body| {
            serde_json::from_str::<SearchResponse>(&body)
                .map(SearchResponse::into_results)
                .map_err(request_failed)
        });

        match result {
            Ok(videos) => Outcome::ok(videos),
            Err(e) => {
                tracing::warn!("Video search failed: {}", e);
                Outcome::degraded(vec![], e)
            }
        }
    }

    async fn get(&self, resource: &str, params: &[(&str, &str)]) -> Result<String, AdapterError> {
        let url = format!(
            "{}/youtube/v3/{}",
            self.api_hostname.trim_end_matches("/"),
            resource
        );
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        let body = response.text().await.map_err(request_failed)?;

        if !status.is_success() {
            if is_invalid_key(&body) {
                return Err(AdapterError::InvalidCredential {
                    service: Service::Video,
                });
            }
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .map(|msg| format!("{}: {}", status, msg))
                .unwrap_or_else(|| status.to_string());
            return Err(request_failed(message));
        }

        Ok(body)
    }
}

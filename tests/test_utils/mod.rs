//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{Router, body::Body};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

use ipl_ai::api::AppState;
use ipl_ai::api::app;
use ipl_ai::core::AppConfig;
use ipl_ai::core::config::{CHAT_API_KEY_VAR, VIDEO_API_KEY_VAR};
use ipl_ai::core::startup::Services;

pub fn test_config(chat_url: &str, video_url: &str) -> AppConfig {
    let mut config = AppConfig::from_lookup(|key| match key {
        CHAT_API_KEY_VAR => Some(String::from("gsk_test")),
        VIDEO_API_KEY_VAR => Some(String::from("yt_test")),
        _ => None,
    })
    .expect("Test config should load");
    config.chat_api_hostname = chat_url.to_string();
    config.video_api_hostname = video_url.to_string();
    config.request_timeout = Duration::from_secs(5);
    config
}

/// Creates the shared state for a test app. The startup probes are
/// skipped.
pub fn test_state(config: &AppConfig) -> Arc<RwLock<AppState>> {
    let services = Services::new(config).expect("Failed to build clients");
    Arc::new(RwLock::new(AppState::new(config, services)))
}

/// Creates a test application router whose chat and video clients
/// point at the given mock servers.
pub fn test_app(chat_url: &str, video_url: &str) -> Router {
    app(test_state(&test_config(chat_url, video_url)))
}

pub async fn mock_chat_reply(server: &mut ServerGuard, content: &str) -> Mock {
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-123",
                "object": "chat.completion",
                "model": "llama3-8b-8192",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await
}

pub async fn mock_chat_failure(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "internal error"}}"#)
        .create_async()
        .await
}

/// Mock a search response with `count` videos with ids `vid0`,
/// `vid1`, ... and titles `Highlights 0`, `Highlights 1`, ...
pub async fn mock_video_results(server: &mut ServerGuard, count: usize) -> Mock {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": format!("vid{}", i)},
                "snippet": {"title": format!("Highlights {}", i)}
            })
        })
        .collect();

    server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"items": items}).to_string())
        .create_async()
        .await
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf8")
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::{AdapterError, Service};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

// Groq (and OpenAI) error bodies look like:
// {
//     "error": {
//         "message": "Invalid API Key",
//         "type": "invalid_request_error",
//         "code": "invalid_api_key"
//     }
// }
const INVALID_KEY_CODE: &str = "invalid_api_key";

fn is_invalid_key(status: reqwest::StatusCode, body: &str) -> bool {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return true;
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(body)
        && parsed["error"]["code"].as_str() == Some(INVALID_KEY_CODE)
    {
        return true;
    }
    // Fall back to sniffing the raw text for providers that bury the
    // code somewhere else
    body.contains(INVALID_KEY_CODE)
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .map(|msg| format!("{}: {}", status, msg))
        .unwrap_or_else(|| status.to_string())
}

fn request_failed(message: impl ToString) -> AdapterError {
    AdapterError::RequestFailed {
        service: Service::Chat,
        message: message.to_string(),
    }
}

/// Send one chat completion request to an OpenAI compatible API and
/// return the content of the first choice.
pub async fn completion(
    client: &reqwest::Client,
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    timeout: Duration,
) -> Result<String, AdapterError> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(&payload)
        .send()
        .await
        .map_err(request_failed)?;

    let status = response.status();
    let body = response.text().await.map_err(request_failed)?;

    if !status.is_success() {
        if is_invalid_key(status, &body) {
            return Err(AdapterError::InvalidCredential {
                service: Service::Chat,
            });
        }
        return Err(request_failed(error_message(status, &body)));
    }

    let resp: Value = serde_json::from_str(&body).map_err(request_failed)?;
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| request_failed(format!("No message received. Resp: {}", resp)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_messages_with_lowercase_roles() {
        let msg = Message::new(Role::Assistant, "Mumbai Indians");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "assistant", "content": "Mumbai Indians"})
        );
    }

    #[test]
    fn it_detects_invalid_keys() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert!(is_invalid_key(reqwest::StatusCode::UNAUTHORIZED, body));
        assert!(is_invalid_key(reqwest::StatusCode::BAD_REQUEST, body));
        assert!(is_invalid_key(
            reqwest::StatusCode::FORBIDDEN,
            "upstream said: invalid_api_key"
        ));
        assert!(!is_invalid_key(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":{"message":"overloaded"}}"#
        ));
    }

    #[test]
    fn it_extracts_error_messages() {
        let msg = error_message(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":{"message":"over capacity"}}"#,
        );
        assert_eq!(msg, "503 Service Unavailable: over capacity");
        let msg = error_message(reqwest::StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(msg, "502 Bad Gateway");
    }
}

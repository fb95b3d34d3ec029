use std::fmt;
use std::time::Duration;

use super::errors::AdapterError;

pub const CHAT_API_KEY_VAR: &str = "GROQCLOUD_API_KEY";
pub const VIDEO_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const CHAT_API_HOST_VAR: &str = "IPL_AI_CHAT_API_HOST";
pub const CHAT_MODEL_VAR: &str = "IPL_AI_CHAT_MODEL";
pub const VIDEO_API_HOST_VAR: &str = "IPL_AI_VIDEO_API_HOST";
pub const SYSTEM_MESSAGE_VAR: &str = "IPL_AI_SYSTEM_MESSAGE";
pub const REQUEST_TIMEOUT_VAR: &str = "IPL_AI_REQUEST_TIMEOUT_SECS";
pub const SESSION_TTL_VAR: &str = "IPL_AI_SESSION_TTL_SECS";

const DEFAULT_CHAT_API_HOST: &str = "https://api.groq.com/openai";
const DEFAULT_CHAT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_VIDEO_API_HOST: &str = "https://www.googleapis.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// API keys for the two remote services. Never printed.
#[derive(Clone)]
pub struct Credentials {
    pub chat_api_key: String,
    pub video_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_api_key", &"***")
            .field("video_api_key", &"***")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub chat_api_hostname: String,
    pub chat_model: String,
    pub video_api_hostname: String,
    pub system_message: Option<String>,
    pub request_timeout: Duration,
    /// How long a session can sit idle before its transcript is dropped.
    pub session_ttl: Duration,
}

impl AppConfig {
    /// Resolve the config from a key lookup, usually the process
    /// environment. Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require =
            |key: &str| get(key).ok_or_else(|| AdapterError::MissingCredential(key.to_string()));

        let credentials = Credentials {
            chat_api_key: require(CHAT_API_KEY_VAR)?,
            video_api_key: require(VIDEO_API_KEY_VAR)?,
        };

        let secs = |key: &str, default: u64| match get(key) {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AdapterError::InvalidSetting {
                    var: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(Duration::from_secs(default)),
        };

        let request_timeout = secs(REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let session_ttl = secs(SESSION_TTL_VAR, DEFAULT_SESSION_TTL_SECS)?;

        Ok(Self {
            credentials,
            chat_api_hostname: get(CHAT_API_HOST_VAR)
                .unwrap_or_else(|| DEFAULT_CHAT_API_HOST.to_string()),
            chat_model: get(CHAT_MODEL_VAR).unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            video_api_hostname: get(VIDEO_API_HOST_VAR)
                .unwrap_or_else(|| DEFAULT_VIDEO_API_HOST.to_string()),
            system_message: get(SYSTEM_MESSAGE_VAR),
            request_timeout,
            session_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn it_loads_credentials_and_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (CHAT_API_KEY_VAR, "gsk_test"),
            (VIDEO_API_KEY_VAR, "yt_test"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.chat_api_key, "gsk_test");
        assert_eq!(config.credentials.video_api_key, "yt_test");
        assert_eq!(config.chat_api_hostname, "https://api.groq.com/openai");
        assert_eq!(config.chat_model, "llama3-8b-8192");
        assert_eq!(config.video_api_hostname, "https://www.googleapis.com");
        assert_eq!(config.system_message, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn it_fails_on_missing_chat_key() {
        let result = AppConfig::from_lookup(lookup(&[(VIDEO_API_KEY_VAR, "yt_test")]));
        assert_eq!(
            result.unwrap_err(),
            AdapterError::MissingCredential(CHAT_API_KEY_VAR.to_string())
        );
    }

    #[test]
    fn it_treats_blank_keys_as_missing() {
        let result = AppConfig::from_lookup(lookup(&[
            (CHAT_API_KEY_VAR, "gsk_test"),
            (VIDEO_API_KEY_VAR, "   "),
        ]));
        assert_eq!(
            result.unwrap_err(),
            AdapterError::MissingCredential(VIDEO_API_KEY_VAR.to_string())
        );
    }

    #[test]
    fn it_reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (CHAT_API_KEY_VAR, "gsk_test"),
            (VIDEO_API_KEY_VAR, "yt_test"),
            (CHAT_API_HOST_VAR, "http://localhost:9000"),
            (CHAT_MODEL_VAR, "llama-3.1-8b-instant"),
            (SYSTEM_MESSAGE_VAR, "You only talk about cricket."),
            (REQUEST_TIMEOUT_VAR, "5"),
            (SESSION_TTL_VAR, "600"),
        ]))
        .unwrap();

        assert_eq!(config.chat_api_hostname, "http://localhost:9000");
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
        assert_eq!(
            config.system_message.as_deref(),
            Some("You only talk about cricket.")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.session_ttl, Duration::from_secs(600));
    }

    #[test]
    fn it_rejects_a_bad_timeout() {
        let result = AppConfig::from_lookup(lookup(&[
            (CHAT_API_KEY_VAR, "gsk_test"),
            (VIDEO_API_KEY_VAR, "yt_test"),
            (REQUEST_TIMEOUT_VAR, "soon"),
        ]));
        assert!(matches!(
            result,
            Err(AdapterError::InvalidSetting { ref var, .. }) if var == REQUEST_TIMEOUT_VAR
        ));
    }

    #[test]
    fn it_never_prints_keys() {
        let config = AppConfig::from_lookup(lookup(&[
            (CHAT_API_KEY_VAR, "gsk_secret"),
            (VIDEO_API_KEY_VAR, "yt_secret"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("gsk_secret"));
        assert!(!printed.contains("yt_secret"));
    }
}

//! Error types shared by the configuration loader and both remote
//! API adapters.

use std::fmt;

use thiserror::Error;

/// The remote service an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Chat,
    Video,
}

impl Service {
    /// What was being attempted when a runtime call to the service
    /// failed, as shown to the user.
    fn failed_action(&self) -> &'static str {
        match self {
            Service::Chat => "getting response from IPL AI",
            Service::Video => "fetching YouTube videos",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Service::Chat => write!(f, "Groq"),
            Service::Video => write!(f, "YouTube"),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum AdapterError {
    #[error("Missing API key! Set {0} in the environment or in a .env file.")]
    MissingCredential(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidSetting { var: String, message: String },

    #[error("Invalid {service} API Key! Please verify your API key and try again.")]
    InvalidCredential { service: Service },

    #[error("Failed to initialize {service} client: {message}")]
    Unreachable { service: Service, message: String },

    #[error("Error {}: {message}", .service.failed_action())]
    RequestFailed { service: Service, message: String },
}

impl AdapterError {
    /// Startup probes only distinguish a rejected key from everything
    /// else, which is reported as an unreachable service.
    pub fn into_probe_failure(self) -> Self {
        match self {
            AdapterError::RequestFailed { service, message } => {
                AdapterError::Unreachable { service, message }
            }
            other => other,
        }
    }
}

/// Result of an adapter call that degrades instead of failing. The
/// `value` is always safe to render; `error` is shown inline next to
/// it when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub error: Option<AdapterError>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn degraded(value: T, error: AdapterError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

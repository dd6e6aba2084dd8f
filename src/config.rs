// src/config.rs
use std::env;

use tracing::warn;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000/chat";

/// Settings for the relay process. Built once at startup and handed to the relay.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub port: u16,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("port", &self.port)
            .finish()
    }
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
            warn!("GEMINI_API_KEY is not set; upstream calls will be rejected");
            String::new()
        });
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self { api_key, base_url, model, port }
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let relay_url =
            env::var("MOODBUDDY_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        Self { relay_url }
    }
}

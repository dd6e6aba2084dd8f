// src/services/gemini.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::config::RelayConfig;
use crate::error::RelayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: SystemInstruction,
}

impl GenerateRequest {
    pub fn new(contents: Vec<Content>, system_instruction: impl Into<String>) -> Self {
        Self {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system_instruction.into() }],
            },
        }
    }
}

/// First text segment of the first candidate, or the reason there is none.
///
/// Works on the raw JSON: any parseable body that lacks the reply path is a
/// degraded reply, whatever shape the missing pieces take.
pub fn classify_response(raw: &Value) -> Result<String, RelayError> {
    if let Some(err) = raw.get("error").filter(|e| !e.is_null()) {
        let code = err.get("code").and_then(Value::as_i64);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        error!(code = ?code, "Gemini API error: {}", message);
        return Err(RelayError::Upstream {
            code: code.and_then(|c| u16::try_from(c).ok()),
            message,
        });
    }

    raw.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RelayError::EmptyReply)
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").field("url", &self.url).finish()
    }
}

impl GeminiClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.generate_url(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, RelayError> {
        // Upstream error objects can arrive with any HTTP status, so the
        // body is inspected regardless of it.
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("API error: {}", e);
                RelayError::from(e)
            })?;

        let bytes = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!("API error: upstream body is not JSON: {}", e);
            RelayError::from(e)
        })?;

        info!(
            "RAW GEMINI RESPONSE: {}",
            serde_json::to_string_pretty(&raw).unwrap_or_default()
        );

        classify_response(&raw)
    }
}

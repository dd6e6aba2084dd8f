// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ChatResponse;

pub const EMPTY_REPLY: &str = "Hmm… I didn't catch that. Try again?";
pub const TRANSPORT_REPLY: &str = "Server error contacting Gemini.";

/// Ways a relayed chat turn can fail to produce model text.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The upstream answered with an `error` object.
    #[error("upstream error {code:?}: {message}")]
    Upstream { code: Option<u16>, message: String },
    /// Parseable upstream answer without any candidate text.
    #[error("upstream returned no candidate text")]
    EmptyReply,
    /// The call failed or the body was not JSON.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream { code, .. } => code
                .and_then(|c| StatusCode::from_u16(c).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            RelayError::EmptyReply => StatusCode::OK,
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn reply(&self) -> String {
        match self {
            RelayError::Upstream { message, .. } => format!(
                "API Error: {}. Check your API Key and Model availability.",
                message
            ),
            RelayError::EmptyReply => EMPTY_REPLY.to_string(),
            RelayError::Transport(_) => TRANSPORT_REPLY.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(ChatResponse { reply: self.reply() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_falls_back_to_500() {
        let missing = RelayError::Upstream { code: None, message: "x".into() };
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bogus = RelayError::Upstream { code: Some(42), message: "x".into() };
        assert_eq!(bogus.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let quota = RelayError::Upstream { code: Some(429), message: "quota".into() };
        assert_eq!(quota.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(quota.reply().contains("quota"));
    }

    #[test]
    fn empty_reply_keeps_ok_status() {
        assert_eq!(RelayError::EmptyReply.status(), StatusCode::OK);
        assert_eq!(RelayError::EmptyReply.reply(), EMPTY_REPLY);
    }
}

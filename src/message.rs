// src/message.rs
use serde::{Deserialize, Serialize};

use crate::mood::Mood;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self { sender, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub mood: Option<Mood>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&Message::system("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"system","text":"hi"}"#);
    }

    #[test]
    fn unknown_sender_is_rejected() {
        let parsed = serde_json::from_str::<Message>(r#"{"sender":"admin","text":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn mood_may_be_missing_or_null() {
        let missing: ChatRequest = serde_json::from_str(r#"{"messages":[]}"#).unwrap();
        assert!(missing.mood.is_none());

        let null: ChatRequest = serde_json::from_str(r#"{"messages":[],"mood":null}"#).unwrap();
        assert!(null.mood.is_none());

        let happy: ChatRequest = serde_json::from_str(r#"{"messages":[],"mood":"happy"}"#).unwrap();
        assert_eq!(happy.mood, Some(Mood::Happy));
    }
}

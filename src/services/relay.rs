// src/services/relay.rs
use tracing::{debug, instrument};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::message::{ChatRequest, Message, Sender};
use crate::mood::Mood;
use crate::services::gemini::{Content, GeminiClient, GenerateRequest, Part};

pub fn system_instruction(mood: Option<Mood>) -> String {
    let mood = mood.map(|m| m.as_str()).unwrap_or("null");
    format!(
        "You are MoodBuddy, a warm emotional support companion. \
         You are NOT a therapist. Keep replies gentle, short, and kind. \
         The user's detected mood is: {}.",
        mood
    )
}

/// Anything that is not the user speaks as the model.
pub fn role_for(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot | Sender::System => "model",
    }
}

pub fn to_contents(messages: &[Message]) -> Vec<Content> {
    messages
        .iter()
        .map(|m| Content {
            role: role_for(m.sender).to_string(),
            parts: vec![Part { text: m.text.clone() }],
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct Relay {
    gemini: GeminiClient,
}

impl Relay {
    pub fn new(config: &RelayConfig) -> Self {
        Self { gemini: GeminiClient::new(config) }
    }

    pub fn build_request(request: &ChatRequest) -> GenerateRequest {
        GenerateRequest::new(to_contents(&request.messages), system_instruction(request.mood))
    }

    #[instrument(skip_all, fields(turns = request.messages.len(), mood = ?request.mood))]
    pub async fn relay_chat(&self, request: &ChatRequest) -> Result<String, RelayError> {
        let upstream = Self::build_request(request);
        debug!("forwarding {} turns to Gemini", upstream.contents.len());
        self.gemini.generate(&upstream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_senders_to_roles() {
        let contents = to_contents(&[
            Message::system("Mood detected: SAD"),
            Message::bot("You seem a bit low."),
            Message::user("yeah"),
        ]);
        let roles: Vec<_> = contents.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, vec!["model", "model", "user"]);
        assert_eq!(contents[2].parts[0].text, "yeah");
    }

    #[test]
    fn instruction_embeds_mood() {
        assert!(system_instruction(Some(Mood::Angry)).ends_with("detected mood is: angry."));
        assert!(system_instruction(None).ends_with("detected mood is: null."));
    }

    #[test]
    fn build_request_keeps_order() {
        let req = ChatRequest {
            messages: vec![Message::user("a"), Message::bot("b"), Message::user("c")],
            mood: Some(Mood::Happy),
        };
        let upstream = Relay::build_request(&req);
        let texts: Vec<_> = upstream.contents.iter().map(|c| c.parts[0].text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(upstream.system_instruction.parts[0].text.contains("happy"));
    }
}

// src/client.rs
use rand::Rng;
use reqwest::Client;
use tracing::warn;

use crate::config::ClientConfig;
use crate::message::{ChatRequest, ChatResponse, Message, Sender};
use crate::mood::Mood;

pub const CONNECT_FALLBACK: &str = "Sorry, I couldn't connect right now.";

/// Session-scoped, append-only chat history.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended at or after position `from`.
    pub fn since(&self, from: usize) -> &[Message] {
        self.messages.get(from..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub fn render_bubble(message: &Message) -> String {
    let tag = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
        Sender::System => "system",
    };
    format!("[{}] {}", tag, message.text)
}

/// Position-keyed lines for the messages at or after `from`.
pub fn render(transcript: &Transcript, from: usize) -> Vec<String> {
    transcript
        .since(from)
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{:>3} {}", from + i, render_bubble(m)))
        .collect()
}

pub struct MoodBuddy {
    transcript: Transcript,
    mood: Option<Mood>,
    http: Client,
    relay_url: String,
}

impl MoodBuddy {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            transcript: Transcript::new(),
            mood: None,
            http: Client::new(),
            relay_url: config.relay_url.clone(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn detect_mood(&mut self) -> Mood {
        let mut rng = rand::thread_rng();
        self.detect_mood_with(&mut rng)
    }

    /// Picks a mood, stores it and appends the announcement plus the scripted question.
    pub fn detect_mood_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Mood {
        let mood = Mood::random(rng);
        self.mood = Some(mood);
        self.transcript.push(Message::system(mood.announcement()));
        self.transcript.push(Message::bot(mood.prompt()));
        mood
    }

    /// Returns false when `text` is blank and nothing was sent.
    pub async fn send_message(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.transcript.push(Message::user(text));
        let request = ChatRequest {
            messages: self.transcript.messages().to_vec(),
            mood: self.mood,
        };

        let reply = match self.post(&request).await {
            Ok(response) => response.reply,
            Err(e) => {
                warn!("AI Error: {}", e);
                CONNECT_FALLBACK.to_string()
            }
        };
        self.transcript.push(Message::bot(reply));
        true
    }

    // The relay puts a displayable reply in every body, error statuses included.
    async fn post(&self, request: &ChatRequest) -> Result<ChatResponse, reqwest::Error> {
        self.http
            .post(&self.relay_url)
            .json(request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn buddy() -> MoodBuddy {
        MoodBuddy::new(&ClientConfig {
            relay_url: "http://127.0.0.1:9/chat".to_string(),
        })
    }

    #[test]
    fn detect_appends_system_then_bot() {
        let mut b = buddy();
        let mut rng = StdRng::seed_from_u64(1);
        let mood = b.detect_mood_with(&mut rng);

        assert_eq!(b.mood(), Some(mood));
        let msgs = b.transcript().messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0], Message::system(mood.announcement()));
        assert_eq!(msgs[1], Message::bot(mood.prompt()));
    }

    #[test]
    fn since_past_end_is_empty() {
        let mut t = Transcript::new();
        t.push(Message::user("a"));
        assert_eq!(t.since(0).len(), 1);
        assert!(t.since(1).is_empty());
        assert!(t.since(5).is_empty());
    }

    #[test]
    fn render_tags_by_sender() {
        let mut t = Transcript::new();
        t.push(Message::system("Mood detected: HAPPY"));
        t.push(Message::user("hi"));
        let lines = render(&t, 0);
        assert_eq!(lines[0], "  0 [system] Mood detected: HAPPY");
        assert_eq!(lines[1], "  1 [you] hi");

        let tail = render(&t, 1);
        assert_eq!(tail, vec!["  1 [you] hi".to_string()]);
        assert!(render(&t, 2).is_empty());
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut b = buddy();
        assert!(!b.send_message("").await);
        assert!(!b.send_message("   ").await);
        assert!(b.transcript().is_empty());
    }
}

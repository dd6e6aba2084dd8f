use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Surprised,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Surprised => "surprised",
            Mood::Neutral => "neutral",
        }
    }

    /// Scripted opening question the bot asks after a detection.
    pub fn prompt(&self) -> &'static str {
        match self {
            Mood::Happy => "You look happy! What made you smile today? 😊",
            Mood::Sad => "You seem a bit low. Want to share what's on your mind? 💙",
            Mood::Angry => "You look frustrated. What happened? 😤",
            Mood::Surprised => "You look surprised! Was it a good surprise? 😮",
            Mood::Neutral => "How are you feeling inside right now? 😶",
        }
    }

    pub fn announcement(&self) -> String {
        format!("Mood detected: {}", self.as_str().to_uppercase())
    }

    /// Uniform pick over the five moods. No camera input is consulted yet.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Mood {
        Mood::ALL[rng.gen_range(0..Mood::ALL.len())]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use moodbuddy::client::{MoodBuddy, render};
use moodbuddy::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    moodbuddy::init_tracing();

    let config = ClientConfig::from_env();
    let mut buddy = MoodBuddy::new(&config);

    println!("Mood Buddy - your friendly emotional check-in buddy 💛");
    println!("Type a message, /detect to check your mood, /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let seen = buddy.transcript().len();

        match line.trim() {
            "/quit" => break,
            "/detect" => {
                buddy.detect_mood();
            }
            _ => {
                buddy.send_message(&line).await;
            }
        }

        for line in render(buddy.transcript(), seen) {
            println!("{}", line);
        }
    }

    Ok(())
}

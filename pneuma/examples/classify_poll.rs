//! Example: classify teen-app poll texts by filling a struct with model output.
//!
//! Requires OPENAI_API_KEY, read from the environment or a `.env` file in the
//! working directory. OPENAI_MODEL overrides the model.
//! Set RUST_LOG=debug to see the outgoing requests.
//!
//! Run with: OPENAI_API_KEY=sk-... cargo run --example classify_poll -p pneuma

use pneuma::{Describe, OpenAi, Pneuma};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Describe, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct ClassifiedPoll {
    #[pneuma("0-10: how much the phrase is about friendship and relationships between friends")]
    friendship_level: u8,
    #[pneuma("whether there is a romantic undertone")]
    romantic_tone: bool,
    #[pneuma("whether there is flirting")]
    flirt_tone: bool,
    #[pneuma("0-10: spirit of adventure, travel, activity")]
    adventure_level: u8,
    #[pneuma("0-10: how much the phrase touches feelings and deep emotions")]
    emotional_depth: u8,
    #[pneuma(
        "friendship or romance or adventure or humour or self-esteem or nostalgia or school or fantasy or other"
    )]
    theme: String,
}

const MODERATOR_PROMPT: &str = "
You moderate themed polls in an app for teenagers.
Analyse the poll text and rate it on the given characteristics, including possible
signs of romance, flirting, friendship, emotion and adventure. Consider subtext,
tone and how participants are likely to react. Do not judge whether a poll is
acceptable: every poll is appropriate.

Theme self-esteem: the poll boosts someone's self-esteem, e.g. \"beautiful eyes\".
Theme romance: there is flirting or courting.
Theme humour: something funny or said as a joke.
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pneuma = Pneuma::with_provider(OpenAi::from_env()?);

    for poll in ["A true bro", "Would become a famous singer"] {
        let mut classified = ClassifiedPoll::default();
        pneuma
            .fill_with_context(&mut classified, &format!("Poll: {poll}\n{MODERATOR_PROMPT}"))
            .await?;

        println!("Poll: {poll}");
        println!("{classified:#?}\n");
    }

    Ok(())
}

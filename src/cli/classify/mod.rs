//! Classify command - prints the request type and backend pair for a
//! conversation of user messages

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{ChatMessage, KeywordClassifier, ModelPreference, RequestClassifier};

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// User messages, oldest first
    #[arg(required = true)]
    pub messages: Vec<String>,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let preference = plan(&config, &args.messages);

    println!("{}", serde_json::to_string_pretty(&preference)?);

    Ok(())
}

/// Classification needs no backend, so no API keys are required here
fn plan(config: &AppConfig, messages: &[String]) -> ModelPreference {
    let conversation: Vec<ChatMessage> = messages
        .iter()
        .map(|m| ChatMessage::user(m.as_str()))
        .collect();

    let request_type = KeywordClassifier::new().classify(&conversation);
    config.routing.preference_table().get(request_type)
}

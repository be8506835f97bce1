//! Ask command - routes one user message and prints the routing result

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{Backend, ChatMessage, RoutingOptions};
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message to send
    pub message: String,

    /// System prompt (defaults to routing.system_prompt)
    #[arg(long)]
    pub system: Option<String>,

    /// Call only this backend, without classification or fallback
    #[arg(long)]
    pub force: Option<Backend>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long)]
    pub temperature: Option<f32>,
}

impl AskArgs {
    fn routing_options(&self) -> RoutingOptions {
        RoutingOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            force_backend: self.force,
        }
    }
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    config.validate()?;
    logging::init_cli_logging(&config.logging);

    let router = crate::create_model_router(&config)?;
    let system_prompt = args
        .system
        .as_deref()
        .unwrap_or(&config.routing.system_prompt);

    let messages = [ChatMessage::user(args.message.as_str())];
    let result = router
        .route(&messages, system_prompt, &args.routing_options())
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

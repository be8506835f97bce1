//! CLI module for JACC Assistant
//!
//! Subcommands:
//! - `serve`: HTTP API server
//! - `ask`: route one message and print the result
//! - `classify`: show the request type and backend pair for a conversation

pub mod ask;
pub mod classify;
pub mod serve;

use clap::{Parser, Subcommand};

/// JACC Assistant - routes chat requests between OpenAI and Anthropic
#[derive(Parser)]
#[command(name = "jacc-assistant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Route a single message and print the result as JSON
    Ask(ask::AskArgs),

    /// Classify a conversation without calling any backend
    Classify(classify::ClassifyArgs),
}

//! CLI command handlers

use std::path::Path;

use tracing::info;

use crate::cli::output::print_answer;
use crate::cli::output::print_config;
use crate::cli::output::print_remaining;
use crate::errors::Result;
use crate::models::ConversationTurn;
use crate::rag::RagService;
use crate::rate_limit::RateLimiter;
use crate::AppConfig;

/// Handle the ask command: resolve one question through the full pipeline
pub async fn handle_ask_command(
    service: &RagService,
    question: &str,
    history_path: Option<&Path>,
) -> Result<()> {
    let history = match history_path {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    info!("Asking with {} history turns", history.len());

    let outcome = service.answer(question, &history).await?;
    print_answer(&outcome);
    Ok(())
}

/// Handle the remaining command: show generation quota left
pub fn handle_remaining_command(limiter: &RateLimiter) {
    print_remaining(&limiter.remaining_questions());
}

/// Handle the reset-limit command: clear all rate-limit counters
pub fn handle_reset_limit_command(limiter: &RateLimiter) -> Result<()> {
    limiter.reset()?;
    println!("✅ Rate-limit counters cleared");
    Ok(())
}

/// Handle the config command: show the active configuration
pub fn handle_config_command(config: &AppConfig) {
    print_config(config);
}

/// Load conversation history from a JSON file of turns
fn load_history(path: &Path) -> Result<Vec<ConversationTurn>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

//! CLI output formatting utilities

use crate::rag::AnswerOutcome;
use crate::rag::AnswerSource;
use crate::rate_limit::RemainingQuestions;
use crate::AppConfig;

/// Print a resolved answer with its resolution stage
pub fn print_answer(outcome: &AnswerOutcome) {
    let stage = match outcome.source {
        AnswerSource::Predefined => "predefined",
        AnswerSource::ContextReference => "context reference",
        AnswerSource::ExactPattern => "exact pattern",
        AnswerSource::KeywordPattern => "keyword pattern",
        AnswerSource::KeywordTable => "keyword table",
        AnswerSource::Greeting => "greeting",
        AnswerSource::RateLimited => "rate limited",
        AnswerSource::Generated => "generated",
    };
    println!("💬 Answer ({stage}):");
    println!();
    println!("{}", outcome.text);
    if outcome.charged {
        println!();
        println!("  (counted against the generation quota)");
    }
}

/// Print the remaining generation quota
pub fn print_remaining(remaining: &RemainingQuestions) {
    println!("📊 Remaining generation quota:");
    println!("  - This hour: {}", remaining.hourly);
    println!("  - Today: {}", remaining.daily);
}

/// Print the active configuration, masking the API key
pub fn print_config(config: &AppConfig) {
    println!("⚙️  Current configuration:");
    println!("  - Owner: {}", config.owner_name());
    println!("  - LLM endpoint: {}", config.llm_endpoint());
    println!("  - LLM model: {}", config.llm_model());
    println!(
        "  - LLM key: {}",
        if config.llm_key().is_empty() {
            "(not set)"
        } else {
            "(set)"
        }
    );
    println!(
        "  - Rate limit: {}/hour, {}/day",
        config.max_questions_per_hour(),
        config.max_questions_per_day()
    );
    println!("  - Log level: {}", config.logging.level);
}

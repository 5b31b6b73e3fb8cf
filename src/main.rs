use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use foliorag::cli::handle_ask_command;
use foliorag::cli::handle_config_command;
use foliorag::cli::handle_remaining_command;
use foliorag::cli::handle_reset_limit_command;
use foliorag::config::AppConfig;
use foliorag::llm::GeminiClient;
use foliorag::rag::RagService;
use foliorag::rate_limit::FileCounterStore;
use foliorag::rate_limit::RateLimiter;
use foliorag::store::MemoryProfileStore;
use foliorag::Result;
use tracing::info;

/// Where rate-limit counters persist between CLI invocations
const COUNTER_FILE: &str = ".foliorag/rate_limits.json";

#[derive(Parser)]
#[command(name = "foliorag")]
#[command(about = "Portfolio chatbot CLI: pattern-matched answers with a rate-limited LLM fallback")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the portfolio chatbot a question
    Ask {
        /// The question to ask
        question: String,
        /// JSON file with prior conversation turns
        #[arg(long)]
        history: Option<PathBuf>,
        /// JSON profile seed file (empty profile when omitted)
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Show remaining generation quota for this hour and day
    Remaining,
    /// Clear all rate-limit counters
    ResetLimit,
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        foliorag::logging::init_logging_with_level("debug")?;
    } else {
        foliorag::logging::init_logging(None)?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    let counters = Arc::new(FileCounterStore::new(COUNTER_FILE));

    // Execute the requested command
    match cli.command {
        Commands::Ask {
            question,
            history,
            profile,
        } => {
            let store = match profile {
                Some(path) => Arc::new(MemoryProfileStore::from_json_file(path)?),
                None => Arc::new(MemoryProfileStore::default()),
            };
            let generator = Arc::new(GeminiClient::from_config(&config)?);
            let service = RagService::with_counter_store(&config, store, generator, counters);
            handle_ask_command(&service, &question, history.as_deref()).await?;
        }
        Commands::Remaining => {
            let limiter = RateLimiter::new(config.rate_limit.clone(), counters);
            handle_remaining_command(&limiter);
        }
        Commands::ResetLimit => {
            let limiter = RateLimiter::new(config.rate_limit.clone(), counters);
            handle_reset_limit_command(&limiter)?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

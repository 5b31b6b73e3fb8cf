//! Answer-resolution pipeline
//!
//! This module wires the full resolution chain for a portfolio question:
//! - Matcher chain over predefined answers, question patterns, the legacy
//!   keyword table, and greeting detection
//! - Category detection to scope context retrieval
//! - Context assembly from profile records
//! - Rate-limited LLM generation as the final fallback
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use foliorag::config::AppConfig;
//! use foliorag::llm::GeminiClient;
//! use foliorag::rag::RagService;
//! use foliorag::store::MemoryProfileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let store = Arc::new(MemoryProfileStore::from_json_file("profile.json")?);
//!     let generator = Arc::new(GeminiClient::from_config(&config)?);
//!     let service = RagService::new(&config, store, generator);
//!
//!     let outcome = service.answer("어떤 기술 스택을 사용하세요?", &[]).await?;
//!     println!("{}", outcome.text);
//!
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod context;
pub mod matcher;
pub mod pipeline;
pub mod predefined;

pub use categories::detect_categories;
pub use context::ContextAssembler;
pub use matcher::MatcherChain;
pub use pipeline::AnswerOutcome;
pub use pipeline::AnswerSource;
pub use pipeline::RagService;
pub use predefined::default_predefined_answers;

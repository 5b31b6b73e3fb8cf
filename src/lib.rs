pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod matching;
pub mod models;
pub mod rag;
pub mod rate_limit;
pub mod store;
pub mod template;

pub use config::AppConfig;
pub use errors::*;

//! LLM text generation boundary
//!
//! Generation is an opaque external call: system prompt and user message in,
//! text out. The [`TextGenerator`] trait keeps the pipeline testable with a
//! stub; [`GeminiClient`] is the production implementation.

pub mod gemini;
pub mod prompts;

use async_trait::async_trait;

use crate::errors::Result;

pub use gemini::GeminiClient;

/// Opaque text generation function
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate an answer from a system prompt and a user message.
    ///
    /// # Errors
    /// - API failures (network, auth, quota) surface as `LlmError`/`HttpError`
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

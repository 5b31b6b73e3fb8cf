//! The answer pipeline: matcher chain first, rate-limited generation last
//!
//! Resolution order is fixed: the matcher chain runs unconditionally and its
//! hits are never charged against the quota. Only when every matcher misses
//! does the pipeline consult the rate limiter, charge one question, retrieve
//! category-scoped context and call the generator.

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::FolioRagError;
use crate::errors::Result;
use crate::llm::prompts::build_portfolio_system_prompt;
use crate::llm::prompts::build_user_message;
use crate::llm::TextGenerator;
use crate::models::Category;
use crate::models::ConversationTurn;
use crate::rag::categories::detect_categories;
use crate::rag::context::ContextAssembler;
use crate::rag::matcher::MatcherChain;
use crate::rate_limit::CounterStore;
use crate::rate_limit::MemoryCounterStore;
use crate::rate_limit::RateLimiter;
use crate::rate_limit::RemainingQuestions;
use crate::store::ProfileStore;

/// Which stage of the pipeline produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Predefined,
    ContextReference,
    ExactPattern,
    KeywordPattern,
    KeywordTable,
    Greeting,
    RateLimited,
    Generated,
}

/// A resolved answer and how it was produced
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub text: String,
    pub source: AnswerSource,
    /// True only when the answer consumed rate-limit quota
    pub charged: bool,
}

/// The full question-answering service
pub struct RagService {
    store: Arc<dyn ProfileStore>,
    generator: Arc<dyn TextGenerator>,
    limiter: RateLimiter,
    matcher: MatcherChain,
    owner_name: String,
}

impl RagService {
    /// Service with in-memory rate-limit counters
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn ProfileStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self::with_counter_store(config, store, generator, Arc::new(MemoryCounterStore::new()))
    }

    /// Service with caller-supplied counter persistence
    pub fn with_counter_store(
        config: &AppConfig,
        store: Arc<dyn ProfileStore>,
        generator: Arc<dyn TextGenerator>,
        counters: Arc<dyn CounterStore>,
    ) -> Self {
        let matcher = MatcherChain::with_default_predefined(store.clone(), config.owner_name());
        Self {
            store,
            generator,
            limiter: RateLimiter::new(config.rate_limit.clone(), counters),
            matcher,
            owner_name: config.owner_name().to_string(),
        }
    }

    /// Answer a question, consulting the matcher chain before the rate-limited
    /// generation fallback.
    ///
    /// # Errors
    /// - `InvalidInput` when the question is blank
    /// - Store failures during context retrieval
    /// - Generator failures (`LlmError`/`HttpError`)
    ///
    /// A rate-limit denial is not an error: it resolves to a
    /// [`AnswerSource::RateLimited`] outcome carrying the denial text.
    pub async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<AnswerOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return Err(FolioRagError::InvalidInput(
                "question must not be blank".to_string(),
            ));
        }

        if let Some(hit) = self.matcher.try_match(question, history).await {
            info!("Answered from matcher stage {:?}", hit.source);
            return Ok(AnswerOutcome {
                text: hit.text,
                source: hit.source,
                charged: false,
            });
        }

        let decision = self.limiter.can_ask_question();
        if !decision.allowed {
            let reason = decision.reason.unwrap_or_default();
            info!("Generation fallback denied by rate limit");
            return Ok(AnswerOutcome {
                text: format!(
                    "⚠️ {reason}\n\n사전 준비된 질문은 제한 없이 사용할 수 있습니다."
                ),
                source: AnswerSource::RateLimited,
                charged: false,
            });
        }

        // Charge the quota at the point of commitment to generation
        self.limiter.log_question()?;

        let scope = detect_categories(question);
        debug!("Detected categories: {:?}", scope);
        let contexts = self.assemble_contexts(&scope).await?;

        let system_prompt = build_portfolio_system_prompt(&self.owner_name, &scope);
        let user_message = build_user_message(question, &self.owner_name, &contexts);

        let text = self.generator.generate(&system_prompt, &user_message).await?;
        info!("Answered from generation fallback");

        Ok(AnswerOutcome {
            text,
            source: AnswerSource::Generated,
            charged: true,
        })
    }

    /// Remaining hourly and daily generation quota
    pub fn remaining_questions(&self) -> RemainingQuestions {
        self.limiter.remaining_questions()
    }

    /// Clear all rate-limit counters
    ///
    /// # Errors
    /// - Counter store read/write failures
    pub fn reset_rate_limit(&self) -> Result<()> {
        self.limiter.reset()
    }

    /// Fetch and format the profile records in `scope` as context blocks.
    /// An empty scope fetches every category.
    async fn assemble_contexts(&self, scope: &[Category]) -> Result<Vec<String>> {
        let mut contexts = Vec::new();

        if ContextAssembler::in_scope(scope, Category::Personal) {
            if let Some(personal) = self.store.personal_info().await? {
                contexts.push(ContextAssembler::format_personal(&personal));
            }
        }

        if ContextAssembler::in_scope(scope, Category::Skills) {
            for skill in self.store.skills().await? {
                contexts.push(ContextAssembler::format_skill(&skill));
            }
        }

        if ContextAssembler::in_scope(scope, Category::Projects) {
            for project in self.store.projects().await? {
                contexts.push(ContextAssembler::format_project(&project));
            }
        }

        if ContextAssembler::in_scope(scope, Category::Experience) {
            for entry in self.store.career().await? {
                contexts.push(ContextAssembler::format_career(&entry));
            }
        }

        debug!("Assembled {} context blocks", contexts.len());
        Ok(contexts)
    }
}

//! Profile data store boundary
//!
//! The pipeline never talks to a concrete database; it reads category-scoped
//! record collections through the [`ProfileStore`] trait. The in-memory
//! implementation backs tests and the CLI, seeded from a JSON file.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::Result;
use crate::models::CareerEntry;
use crate::models::KeywordResponse;
use crate::models::PersonalInfo;
use crate::models::Project;
use crate::models::QuestionPattern;
use crate::models::Skill;

/// Read-only access to the portfolio profile tables
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn personal_info(&self) -> Result<Option<PersonalInfo>>;

    async fn skills(&self) -> Result<Vec<Skill>>;

    async fn projects(&self) -> Result<Vec<Project>>;

    async fn career(&self) -> Result<Vec<CareerEntry>>;

    /// Matchable question patterns, loaded per request (implementations may
    /// cache for the process lifetime; the records are immutable)
    async fn question_patterns(&self) -> Result<Vec<QuestionPattern>>;

    /// Legacy keyword table: first row whose keyword appears in the
    /// lowercased question wins
    async fn keyword_lookup(&self, question: &str) -> Result<Option<String>>;
}

/// Seed document for the in-memory store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub personal: Option<PersonalInfo>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub career: Vec<CareerEntry>,
    #[serde(default)]
    pub question_patterns: Vec<QuestionPattern>,
    #[serde(default)]
    pub keyword_responses: Vec<KeywordResponse>,
}

/// In-memory profile store
#[derive(Default)]
pub struct MemoryProfileStore {
    seed: ProfileSeed,
}

impl MemoryProfileStore {
    pub fn new(seed: ProfileSeed) -> Self {
        Self { seed }
    }

    /// Load a store from a JSON seed file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed: ProfileSeed = serde_json::from_str(&content)?;
        Ok(Self::new(seed))
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn personal_info(&self) -> Result<Option<PersonalInfo>> {
        Ok(self.seed.personal.clone())
    }

    async fn skills(&self) -> Result<Vec<Skill>> {
        Ok(self.seed.skills.clone())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.seed.projects.clone())
    }

    async fn career(&self) -> Result<Vec<CareerEntry>> {
        Ok(self.seed.career.clone())
    }

    async fn question_patterns(&self) -> Result<Vec<QuestionPattern>> {
        Ok(self.seed.question_patterns.clone())
    }

    async fn keyword_lookup(&self, question: &str) -> Result<Option<String>> {
        let lowered = question.to_lowercase();
        Ok(self
            .seed
            .keyword_responses
            .iter()
            .find(|row| lowered.contains(&row.keyword.to_lowercase()))
            .map(|row| row.response.clone()))
    }
}

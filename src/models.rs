//! Domain records for the portfolio question-answering pipeline
//!
//! Pattern and profile records are plain immutable data loaded from the
//! profile store; conversation turns are supplied by the caller and never
//! persisted.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Topical category for a question or pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Skills,
    Projects,
    Experience,
    Other,
}

impl Category {
    /// Category name as it appears in prompts and store scopes
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Other => "other",
        }
    }
}

/// How a pattern's question strings are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Keyword,
    Similarity,
}

/// Whether a pattern's answer is a literal or a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Static,
    Template,
}

/// A candidate matchable question with its canned or templated answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPattern {
    pub id: i64,
    /// Literal question strings treated as equivalent; never empty
    pub patterns: Vec<String>,
    /// Tokens used for fuzzy matching
    pub keywords: Vec<String>,
    pub category: Category,
    pub response_type: ResponseKind,
    /// Literal answer, or a template containing `{{placeholder}}` tokens
    pub template: String,
    pub match_type: MatchKind,
}

/// Speaker role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn of recent conversation, supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Personal/portfolio record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
}

/// Skill record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub skill_name: String,
    pub category: String,
    pub proficiency: Option<String>,
    pub description: Option<String>,
}

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub project_name: String,
    pub description: String,
    pub role: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github: Option<String>,
}

/// Career history record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerEntry {
    pub company_name: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Flat keyword -> response row for the legacy lookup table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResponse {
    pub keyword: String,
    pub response: String,
}

/// One logged chargeable question inside a rate-limit bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

/// Chat request payload shape (transport itself is out of scope)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Chat response payload shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error payload shape; `details` is only populated outside production
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

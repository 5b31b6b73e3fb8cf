use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

fn default_llm_model() -> String {
    "gemini-1.5-flash".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_per_hour")]
    pub max_questions_per_hour: u32,
    #[serde(default = "default_max_per_day")]
    pub max_questions_per_day: u32,
}

fn default_max_per_hour() -> u32 {
    10
}

fn default_max_per_day() -> u32 {
    20
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_questions_per_hour: default_max_per_hour(),
            max_questions_per_day: default_max_per_day(),
        }
    }
}

/// Identity of the portfolio owner the chatbot speaks for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerConfig {
    pub name: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            name: "포트폴리오 주인".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub owner: OwnerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FolioRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get hourly question ceiling
    pub fn max_questions_per_hour(&self) -> u32 {
        self.rate_limit.max_questions_per_hour
    }

    /// Get daily question ceiling
    pub fn max_questions_per_day(&self) -> u32 {
        self.rate_limit.max_questions_per_day
    }

    /// Get the portfolio owner name
    pub fn owner_name(&self) -> &str {
        &self.owner.name
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            llm: LlmConfig {
                llm_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                llm_key: String::new(),
                llm_model: default_llm_model(),
            },
            rate_limit: RateLimitConfig::default(),
            owner: OwnerConfig::default(),
        }
    }
}

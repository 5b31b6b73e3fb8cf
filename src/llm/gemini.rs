//! Google Gemini generation client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::FolioRagError;
use crate::errors::Result;
use crate::llm::TextGenerator;

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug)]
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    /// - `ConfigError` when the API key is missing
    /// - HTTP client build errors
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.llm_key().is_empty() {
            return Err(FolioRagError::ConfigError(
                "GEMINI API key is not set. Please configure llm.llm_key".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| FolioRagError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint: config.llm_endpoint().trim_end_matches('/').to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        debug!("Calling Gemini model {}", self.model);

        // Gemini has no separate system role; prepend the system prompt
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{system_prompt}\n\n사용자 질문: {user_message}"),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 1000,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FolioRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FolioRagError::LlmError(format!(
                "Gemini Chat API error ({status}): {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FolioRagError::LlmError(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        Ok(text)
    }
}

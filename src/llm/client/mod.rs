//! Azure OpenAI client for questionnaire risk classification.

mod config;
mod decode;
mod prompts;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{fallback_result, RiskAnalyzer};
use crate::models::{AnalysisResult, Answers};

pub use config::LlmConfig;
pub use decode::{decode_analysis, strip_markdown_fence};
pub use prompts::build_prompt;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM is not configured")]
    NotConfigured,

    #[error("Could not build prompt")]
    Prompt,

    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Response had no message content")]
    MissingContent,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response does not match the analysis schema")]
    Schema,
}

/// Bound `future` by `limit`, mapping expiry to [`LlmError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, future: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| LlmError::Timeout(limit))?
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// LLM client for questionnaire analysis.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
    live: bool,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let live = config.is_live();
        if live {
            info!("AI analysis enabled");
        } else if config.force_mock {
            info!("AI analysis forced to mock mode; serving canned results");
        } else {
            info!("AI analysis not configured; serving canned results");
        }
        Ok(Self {
            config,
            client,
            live,
        })
    }

    /// Ask the model for an analysis. Every failure is reported, never hidden.
    pub async fn request_analysis(
        &self,
        answers: &Answers,
        extracted_text: &str,
    ) -> Result<AnalysisResult, LlmError> {
        if !self.live {
            return Err(LlmError::NotConfigured);
        }

        let prompt = build_prompt(answers, extracted_text, self.config.max_content_chars)
            .ok_or(LlmError::Prompt)?;

        debug!("Requesting analysis ({} prompt chars)", prompt.len());
        let content = with_timeout(self.config.timeout, self.call_chat(&prompt)).await?;
        decode_analysis(&content)
    }

    /// Call the chat-completions endpoint once and return the message text.
    async fn call_chat(&self, prompt: &str) -> Result<String, LlmError> {
        let (url, api_key) = self.config.chat_target().ok_or(LlmError::NotConfigured)?;

        let request = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompts::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let resp = self
            .client
            .post(&url)
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::MissingContent)
    }
}

#[async_trait]
impl RiskAnalyzer for LlmClient {
    fn is_configured(&self) -> bool {
        self.live
    }

    async fn analyze(&self, answers: &Answers, extracted_text: &str) -> AnalysisResult {
        match self.request_analysis(answers, extracted_text).await {
            Ok(result) => {
                debug!("Model returned a valid analysis");
                result
            }
            Err(LlmError::NotConfigured) => fallback_result(),
            Err(e) => {
                warn!("AI analysis failed, using fallback: {}", e);
                fallback_result()
            }
        }
    }
}

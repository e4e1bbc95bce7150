//! LLM client configuration.

use std::time::Duration;

use crate::config::non_blank;

/// Configuration for the chat-completions deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Resource endpoint, e.g. `https://<name>.openai.azure.com`
    pub endpoint: Option<String>,
    /// API key sent in the `api-key` header
    pub api_key: Option<String>,
    /// Deployment (model) name
    pub deployment: Option<String>,
    pub api_version: String,
    /// Temperature for generation (0.0 - 1.0)
    pub temperature: f32,
    /// Maximum tokens in response
    pub max_tokens: u32,
    pub top_p: f32,
    /// Hard limit for the single model call
    pub timeout: Duration,
    /// Skip the provider entirely and always serve the canned result
    pub force_mock: bool,
    /// Maximum characters of extracted document text to send
    pub max_content_chars: usize,
}

fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: None,
            api_version: default_api_version(),
            temperature: 0.2,
            max_tokens: 1500,
            top_p: 0.95,
            timeout: Duration::from_secs(8),
            force_mock: false,
            max_content_chars: 12000,
        }
    }
}

impl LlmConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `AZURE_OPENAI_ENDPOINT`
    /// - `AZURE_OPENAI_API_KEY`
    /// - `AZURE_OPENAI_DEPLOYMENT`: deployment name
    /// - `AZURE_OPENAI_API_VERSION`
    /// - `USE_MOCK_AI`: "true" or "1" to always serve the canned result
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_MAX_CONTENT_CHARS`: Max document chars to send
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("AZURE_OPENAI_ENDPOINT") {
            self.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("AZURE_OPENAI_API_KEY") {
            self.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("AZURE_OPENAI_DEPLOYMENT") {
            self.deployment = Some(val);
        }
        if let Ok(val) = std::env::var("AZURE_OPENAI_API_VERSION") {
            self.api_version = val;
        }
        if let Ok(val) = std::env::var("USE_MOCK_AI") {
            self.force_mock = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_content_chars = n;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_deployment(mut self, deployment: &str) -> Self {
        self.deployment = Some(deployment.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_force_mock(mut self, force_mock: bool) -> Self {
        self.force_mock = force_mock;
        self
    }

    /// Chat-completions URL and API key, if every value is present.
    pub fn chat_target(&self) -> Option<(String, &str)> {
        let endpoint = non_blank(self.endpoint.as_deref())?.trim_end_matches('/');
        let key = non_blank(self.api_key.as_deref())?;
        let deployment = non_blank(self.deployment.as_deref())?;
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint, deployment, self.api_version
        );
        Some((url, key))
    }

    /// Whether analysis requests will reach the provider.
    pub fn is_live(&self) -> bool {
        !self.force_mock && self.chat_target().is_some()
    }
}

fn parse_flag(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> LlmConfig {
        LlmConfig::default()
            .with_endpoint("https://ai.example.com/")
            .with_api_key("key")
            .with_deployment("gpt-4o")
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert!(!config.is_live());
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert!(!config.force_mock);
    }

    #[test]
    fn test_chat_target() {
        let config = complete();
        let (url, key) = config.chat_target().unwrap();
        assert_eq!(
            url,
            "https://ai.example.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview"
        );
        assert_eq!(key, "key");
    }

    #[test]
    fn test_every_value_required() {
        assert!(complete().is_live());
        let mut missing = complete();
        missing.deployment = None;
        assert!(!missing.is_live());
        assert!(!complete().with_api_key("").is_live());
    }

    #[test]
    fn test_force_mock_wins() {
        assert!(!complete().with_force_mock(true).is_live());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("0"));
    }
}

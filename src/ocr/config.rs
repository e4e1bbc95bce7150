//! OCR provider configuration.

use std::time::Duration;

use crate::config::non_blank;

/// Configuration for the document-analysis provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrConfig {
    /// Provider base URL, e.g. `https://<name>.cognitiveservices.azure.com`
    pub endpoint: Option<String>,
    /// Subscription key sent with every request
    pub api_key: Option<String>,
    /// Analysis model (default: prebuilt-read)
    pub model: String,
    pub api_version: String,
    /// Delay before each status poll
    pub poll_interval: Duration,
    /// Polls allowed before a job counts as timed out
    pub max_poll_attempts: u32,
    /// Timeout for each individual HTTP request
    pub request_timeout: Duration,
    /// Total time one document may take, submit and polls included
    pub max_wait: Duration,
}

fn default_model() -> String {
    "prebuilt-read".to_string()
}

fn default_api_version() -> String {
    "2023-07-31".to_string()
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            api_version: default_api_version(),
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 10,
            request_timeout: Duration::from_secs(10),
            max_wait: Duration::from_secs(15),
        }
    }
}

impl OcrConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT`
    /// - `AZURE_DOCUMENT_INTELLIGENCE_KEY`
    /// - `AZURE_DOCUMENT_INTELLIGENCE_MODEL`
    /// - `AZURE_DOCUMENT_INTELLIGENCE_API_VERSION`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT") {
            self.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("AZURE_DOCUMENT_INTELLIGENCE_KEY") {
            self.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("AZURE_DOCUMENT_INTELLIGENCE_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("AZURE_DOCUMENT_INTELLIGENCE_API_VERSION") {
            self.api_version = val;
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

    pub fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_poll_attempts = max_attempts;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Endpoint (without trailing slash) and key, if both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let endpoint = non_blank(self.endpoint.as_deref())?;
        let key = non_blank(self.api_key.as_deref())?;
        Some((endpoint.trim_end_matches('/'), key))
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        let config = OcrConfig::default();
        assert!(!config.is_complete());
        assert_eq!(config.max_poll_attempts, 10);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.max_wait < Duration::from_secs(30));
    }

    #[test]
    fn test_requires_endpoint_and_key() {
        let config = OcrConfig::default().with_endpoint("https://ocr.example.com/");
        assert!(!config.is_complete());

        let config = config.with_api_key("   ");
        assert!(!config.is_complete());

        let config = config.with_api_key("secret");
        assert_eq!(
            config.credentials(),
            Some(("https://ocr.example.com", "secret"))
        );
    }
}

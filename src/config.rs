//! Process-wide configuration, read once from the environment at start-up.

use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::llm::{LlmClient, LlmConfig};
use crate::ocr::{DocumentIntelligenceClient, OcrConfig};

/// Default requests per minute allowed from one client on the analyze route.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;

/// Application settings. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Document-analysis (OCR) provider
    pub ocr: OcrConfig,
    /// Chat-completions provider
    pub llm: LlmConfig,
    /// Analyze requests allowed per client per minute (0 disables limiting)
    pub rate_limit_per_minute: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            llm: LlmConfig::default(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

impl Settings {
    /// Load settings from environment variables (after `.env` was applied).
    ///
    /// Besides the provider variables, supports `RATE_LIMIT_PER_MINUTE`.
    pub fn from_env() -> Self {
        let mut settings = Self {
            ocr: OcrConfig::from_env(),
            llm: LlmConfig::from_env(),
            ..Self::default()
        };
        if let Ok(val) = std::env::var("RATE_LIMIT_PER_MINUTE") {
            match val.parse() {
                Ok(n) => settings.rate_limit_per_minute = n,
                Err(_) => tracing::warn!("Ignoring invalid RATE_LIMIT_PER_MINUTE: {}", val),
            }
        }
        settings
    }

    /// Build the analysis pipeline with the configured provider clients.
    pub fn build_service(&self) -> anyhow::Result<AnalysisService> {
        let ocr = DocumentIntelligenceClient::new(self.ocr.clone())?;
        let llm = LlmClient::new(self.llm.clone())?;
        Ok(AnalysisService::new(Arc::new(ocr), Arc::new(llm)))
    }
}

/// Treat unset and whitespace-only values alike.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

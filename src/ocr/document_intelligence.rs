//! Azure Document Intelligence client (submit-then-poll).

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{OcrConfig, DOCUMENT_SEPARATOR};
use crate::analysis::TextExtractor;
use crate::models::DocumentUpload;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";

/// Errors for a single document extraction.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR provider not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Submit response had no usable operation-location header")]
    MissingOperation,

    #[error("OCR job failed: {0}")]
    JobFailed(String),

    #[error("OCR job did not finish after {0} polls")]
    Timeout(u32),

    #[error("OCR gave up after {0:?}")]
    Deadline(Duration),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    analyze_result: Option<AnalyzeResult>,
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResult {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: String,
}

/// Job id from an `operation-location` URL: its last path segment.
pub fn parse_operation_id(location: &str) -> Option<String> {
    let url = url::Url::parse(location).ok()?;
    let id = url.path_segments()?.last()?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Document text extraction against Azure Document Intelligence.
pub struct DocumentIntelligenceClient {
    config: OcrConfig,
    client: Client,
    configured: bool,
}

impl DocumentIntelligenceClient {
    /// Create a client. Configured-ness is fixed here for the client's lifetime.
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let configured = config.is_complete();
        if configured {
            info!("OCR enabled (model: {})", config.model);
        } else {
            info!("OCR not configured; uploaded documents will be ignored");
        }
        Ok(Self {
            config,
            client,
            configured,
        })
    }

    /// Extract one document, degrading any failure to an empty string.
    async fn extract_or_empty(&self, file: &DocumentUpload) -> String {
        match self.extract_one(file).await {
            Ok(text) => {
                debug!("OCR extracted {} chars from {}", text.len(), file.label());
                text
            }
            Err(e) => {
                warn!("OCR failed for {}: {}", file.label(), e);
                String::new()
            }
        }
    }

    /// Submit a document and wait for its text, within `max_wait` overall.
    pub async fn extract_one(&self, file: &DocumentUpload) -> Result<String, OcrError> {
        let max_wait = self.config.max_wait;
        tokio::time::timeout(max_wait, async {
            let operation_id = self.submit(file).await?;
            self.poll(&operation_id).await
        })
        .await
        .map_err(|_| OcrError::Deadline(max_wait))?
    }

    async fn submit(&self, file: &DocumentUpload) -> Result<String, OcrError> {
        let (endpoint, key) = self.config.credentials().ok_or(OcrError::NotConfigured)?;
        let url = format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            endpoint, self.config.model, self.config.api_version
        );

        let resp = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header(header::CONTENT_TYPE, &file.mime_type)
            .body(file.bytes.clone())
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Api { status, body });
        }

        resp.headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_operation_id)
            .ok_or(OcrError::MissingOperation)
    }

    async fn poll(&self, operation_id: &str) -> Result<String, OcrError> {
        let (endpoint, key) = self.config.credentials().ok_or(OcrError::NotConfigured)?;
        let url = format!(
            "{}/formrecognizer/documentModels/{}/analyzeResults/{}?api-version={}",
            endpoint, self.config.model, operation_id, self.config.api_version
        );

        for attempt in 1..=self.config.max_poll_attempts {
            tokio::time::sleep(self.config.poll_interval).await;

            let resp = self
                .client
                .get(&url)
                .header(SUBSCRIPTION_KEY_HEADER, key)
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(OcrError::Api { status, body });
            }

            let operation: AnalyzeOperation = resp.json().await?;
            match operation.status.as_str() {
                "succeeded" => {
                    return Ok(operation
                        .analyze_result
                        .map(|r| r.content)
                        .unwrap_or_default());
                }
                "failed" => {
                    let message = operation.error.map(|e| e.message).unwrap_or_default();
                    return Err(OcrError::JobFailed(message));
                }
                status => {
                    debug!(
                        "OCR job {} is {} (poll {}/{})",
                        operation_id, status, attempt, self.config.max_poll_attempts
                    );
                }
            }
        }

        Err(OcrError::Timeout(self.config.max_poll_attempts))
    }
}

#[async_trait]
impl TextExtractor for DocumentIntelligenceClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn extract_many(&self, files: &[DocumentUpload]) -> String {
        if !self.configured || files.is_empty() {
            return String::new();
        }

        let texts = join_all(files.iter().map(|f| self.extract_or_empty(f))).await;
        texts
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR)
    }
}

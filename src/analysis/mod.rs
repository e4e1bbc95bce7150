//! Analysis pipeline: normalize, extract, analyze, respond.
//!
//! [`AnalysisService`] sequences the stages and owns the degradation
//! policy. Only normalization can fail outward; OCR failures degrade to
//! empty text and the analyzer is total, always yielding a valid result.

mod fallback;
mod normalize;
mod validate;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, Instrument};

use crate::models::{AnalysisResult, Answers, DocumentUpload};

pub use fallback::fallback_result;
pub use normalize::{normalize, normalize_answers, InputError};
pub use validate::validate;

/// Best-effort document text extraction.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Whether the provider has everything it needs to run.
    fn is_configured(&self) -> bool;

    /// Combined text of all documents; empty when nothing could be read.
    /// Must not fail.
    async fn extract_many(&self, files: &[DocumentUpload]) -> String;
}

/// Risk classification of a questionnaire.
#[async_trait]
pub trait RiskAnalyzer: Send + Sync {
    /// Whether calls will reach the external model.
    fn is_configured(&self) -> bool;

    /// Classify `answers`. Total: every internal failure resolves to
    /// [`fallback_result`].
    async fn analyze(&self, answers: &Answers, extracted_text: &str) -> AnalysisResult;
}

/// Orchestrates one analysis request.
#[derive(Clone)]
pub struct AnalysisService {
    extractor: Arc<dyn TextExtractor>,
    analyzer: Arc<dyn RiskAnalyzer>,
}

impl AnalysisService {
    pub fn new(extractor: Arc<dyn TextExtractor>, analyzer: Arc<dyn RiskAnalyzer>) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    pub fn ocr_configured(&self) -> bool {
        self.extractor.is_configured()
    }

    pub fn ai_configured(&self) -> bool {
        self.analyzer.is_configured()
    }

    /// Run the whole pipeline on a raw request body.
    pub async fn run(
        &self,
        raw_body: &Value,
        documents: &[DocumentUpload],
    ) -> Result<AnalysisResult, InputError> {
        let answers = normalize(raw_body)?;
        Ok(self.run_answers(&answers, documents).await)
    }

    /// Run extraction and analysis on already-normalized answers.
    pub async fn run_answers(
        &self,
        answers: &Answers,
        documents: &[DocumentUpload],
    ) -> AnalysisResult {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("analysis", %request_id);

        async move {
            info!(
                "Analyzing {} answers with {} documents",
                answers.len(),
                documents.len()
            );

            let extracted_text = self.extract(documents).await;
            let result = self.analyzer.analyze(answers, &extracted_text).await;

            info!(
                "Analysis complete: risk {}, {} issues",
                result.risk_level,
                result.detected_issues.len()
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn extract(&self, documents: &[DocumentUpload]) -> String {
        if documents.is_empty() {
            return String::new();
        }
        if !self.extractor.is_configured() {
            debug!(
                "OCR not configured, skipping {} documents",
                documents.len()
            );
            return String::new();
        }
        let text = self.extractor.extract_many(documents).await;
        debug!("Extracted {} characters of document text", text.len());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentField, RiskLevel};
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeExtractor {
        configured: bool,
        text: &'static str,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl TextExtractor for FakeExtractor {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn extract_many(&self, _files: &[DocumentUpload]) -> String {
            *self.calls.lock().unwrap() += 1;
            self.text.to_string()
        }
    }

    /// Echoes the extracted text into the summary so tests can see it.
    struct EchoAnalyzer;

    #[async_trait]
    impl RiskAnalyzer for EchoAnalyzer {
        fn is_configured(&self) -> bool {
            true
        }

        async fn analyze(&self, answers: &Answers, extracted_text: &str) -> AnalysisResult {
            AnalysisResult {
                risk_level: RiskLevel::Low,
                summary: format!("{}|{}", answers.len(), extracted_text),
                detected_issues: vec![],
            }
        }
    }

    fn service(configured: bool) -> (AnalysisService, Arc<FakeExtractor>) {
        let extractor = Arc::new(FakeExtractor {
            configured,
            text: "salary 100000",
            calls: Mutex::new(0),
        });
        let service = AnalysisService::new(extractor.clone(), Arc::new(EchoAnalyzer));
        (service, extractor)
    }

    fn slip() -> DocumentUpload {
        DocumentUpload::new(DocumentField::SalarySlip, "application/pdf", b"%PDF".to_vec())
    }

    #[tokio::test]
    async fn test_input_error_stops_pipeline() {
        let (service, extractor) = service(true);
        let err = service.run(&json!({}), &[slip()]).await.unwrap_err();
        assert_eq!(err, InputError::Missing);
        assert_eq!(*extractor.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_documents_are_extracted() {
        let (service, extractor) = service(true);
        let result = service
            .run(&json!({"answers": {"itrForm": "ITR-1"}}), &[slip()])
            .await
            .unwrap();
        assert_eq!(result.summary, "1|salary 100000");
        assert_eq!(*extractor.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_documents_skips_extraction() {
        let (service, extractor) = service(true);
        let result = service
            .run(&json!({"answers": {"itrForm": "ITR-1"}}), &[])
            .await
            .unwrap();
        assert_eq!(result.summary, "1|");
        assert_eq!(*extractor.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_ocr_skips_extraction() {
        let (service, extractor) = service(false);
        let result = service
            .run(&json!({"answers": {"a": 1, "b": 2}}), &[slip()])
            .await
            .unwrap();
        assert_eq!(result.summary, "2|");
        assert_eq!(*extractor.calls.lock().unwrap(), 0);
    }
}

//! Data models for taxrelay.

mod analysis;
mod answers;
mod upload;

pub use analysis::{AnalysisResult, DetectedIssue, RiskLevel};
pub use answers::Answers;
pub use upload::{
    check_mime_type, check_size, DocumentField, DocumentUpload, UploadError, ALLOWED_MIME_TYPES,
    MAX_DOCUMENT_BYTES,
};

//! Scanned documents attached to a request.

use axum::body::Bytes;
use thiserror::Error;

/// Largest accepted document, in bytes.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// MIME types the OCR provider is asked to read.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/png", "image/jpeg"];

/// Transport-level problems with an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("File too large. Maximum size is 5MB.")]
    TooLarge,

    #[error("Invalid file type. Only PDF, PNG, and JPEG are allowed.")]
    InvalidType,

    #[error("Unexpected file field: {0}")]
    UnexpectedField(String),

    #[error("Only one file is allowed per field")]
    DuplicateField,

    #[error("Only one answers field is allowed")]
    DuplicateAnswers,
}

/// Accept only the MIME types in [`ALLOWED_MIME_TYPES`] (parameters ignored).
pub fn check_mime_type(mime_type: &str) -> Result<(), UploadError> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    if ALLOWED_MIME_TYPES
        .iter()
        .any(|allowed| essence.eq_ignore_ascii_case(allowed))
    {
        Ok(())
    } else {
        Err(UploadError::InvalidType)
    }
}

pub fn check_size(len: usize) -> Result<(), UploadError> {
    if len > MAX_DOCUMENT_BYTES {
        Err(UploadError::TooLarge)
    } else {
        Ok(())
    }
}

/// Form fields that may carry a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentField {
    SalarySlip,
    Form26As,
}

impl DocumentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentField::SalarySlip => "salarySlip",
            DocumentField::Form26As => "form26as",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "salarySlip" => Some(DocumentField::SalarySlip),
            "form26as" => Some(DocumentField::Form26As),
            _ => None,
        }
    }
}

/// An uploaded document that already passed transport checks.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub field: DocumentField,
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl DocumentUpload {
    pub fn new(field: DocumentField, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            field,
            file_name: None,
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Name to use in log lines.
    pub fn label(&self) -> &str {
        self.file_name.as_deref().unwrap_or(self.field.as_str())
    }
}

//! Multipart form reading for the analyze endpoint.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use serde_json::{json, Value};
use tracing::debug;

use super::error::ApiError;
use crate::models::{
    check_mime_type, check_size, DocumentField, DocumentUpload, UploadError,
};

/// Request body plus checked documents from a multipart form.
#[derive(Debug)]
pub struct AnalysisForm {
    /// Envelope `{ "answers": <text> }`, or `{}` when the field was absent.
    pub body: Value,
    pub documents: Vec<DocumentUpload>,
}

/// Read every field, enforcing the document contract as files stream in.
pub async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, ApiError> {
    let mut answers: Option<String> = None;
    let mut documents: Vec<DocumentUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "answers" {
            if answers.is_some() {
                return Err(UploadError::DuplicateAnswers.into());
            }
            answers = Some(field.text().await?);
            continue;
        }

        match DocumentField::from_str(&name) {
            Some(doc_field) => {
                if documents.iter().any(|d| d.field == doc_field) {
                    return Err(UploadError::DuplicateField.into());
                }
                documents.push(read_document(doc_field, field).await?);
            }
            None if field.file_name().is_some() => {
                return Err(UploadError::UnexpectedField(name).into());
            }
            None => debug!("Ignoring form field {}", name),
        }
    }

    let body = match answers {
        Some(text) => json!({ "answers": text }),
        None => json!({}),
    };
    Ok(AnalysisForm { body, documents })
}

async fn read_document(doc_field: DocumentField, mut field: Field<'_>) -> Result<DocumentUpload, ApiError> {
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    check_mime_type(&mime_type)?;
    let file_name = field.file_name().map(str::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        check_size(bytes.len() + chunk.len())?;
        bytes.extend_from_slice(&chunk);
    }

    let mut upload = DocumentUpload::new(doc_field, mime_type, bytes);
    if let Some(name) = file_name {
        upload = upload.with_file_name(name);
    }
    Ok(upload)
}

//! One-shot analysis from local files.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::Settings;
use crate::models::{check_mime_type, check_size, DocumentField, DocumentUpload};

/// Analyze answers from a JSON file and print the result.
pub async fn cmd_analyze(
    settings: &Settings,
    answers_path: &Path,
    salary_slip: Option<&Path>,
    form26as: Option<&Path>,
) -> anyhow::Result<()> {
    let body = load_answers(answers_path)?;

    let mut documents = Vec::new();
    if let Some(path) = salary_slip {
        documents.push(load_document(DocumentField::SalarySlip, path)?);
    }
    if let Some(path) = form26as {
        documents.push(load_document(DocumentField::Form26As, path)?);
    }

    let service = settings.build_service()?;
    let result = service.run(&body, &documents).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Read the answers object and wrap it in the request envelope.
fn load_answers(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(json!({ "answers": text }))
}

/// Read a document, applying the same checks as HTTP uploads.
fn load_document(field: DocumentField, path: &Path) -> anyhow::Result<DocumentUpload> {
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    check_mime_type(&mime_type).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    check_size(bytes.len()).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    let mut upload = DocumentUpload::new(field, mime_type, bytes);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        upload = upload.with_file_name(name);
    }
    Ok(upload)
}

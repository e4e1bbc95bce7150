//! Document text extraction via an external document-analysis provider.
//!
//! Extraction is best-effort: each document is submitted, polled until it
//! reaches a terminal status or the attempt budget runs out, and any
//! failure for one file simply drops that file's text.

mod config;
mod document_intelligence;

pub use config::OcrConfig;
pub use document_intelligence::{parse_operation_id, DocumentIntelligenceClient, OcrError};

/// Separator placed between the texts of consecutive documents.
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

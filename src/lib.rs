//! taxrelay - tax-filing questionnaire relay.
//!
//! Accepts questionnaire answers and optional scanned documents, extracts
//! document text through an OCR provider, asks an LLM to classify the
//! filing's risk, and always answers with a schema-valid result: provider
//! failures of any kind degrade to a fixed canned analysis.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod server;

#[cfg(test)]
mod testing;

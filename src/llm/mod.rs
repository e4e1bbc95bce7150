//! LLM integration for questionnaire risk classification.
//!
//! Talks to an Azure OpenAI chat-completions deployment and turns its
//! answer into a validated [`AnalysisResult`](crate::models::AnalysisResult).

mod client;

pub use client::{
    build_prompt, decode_analysis, strip_markdown_fence, with_timeout, LlmClient, LlmConfig,
    LlmError,
};

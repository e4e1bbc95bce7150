//! Decoding of model output into an [`AnalysisResult`].

use serde_json::Value;

use super::LlmError;
use crate::analysis::validate;
use crate::models::AnalysisResult;

const FENCE: &str = "```";
const CLOSING_FENCE: &str = "\n```";

/// Remove a surrounding markdown code fence, with or without a `json` tag.
///
/// Content that already starts as a JSON value is returned trimmed, so
/// backticks inside its strings are left alone. When the model wraps the
/// block in prose, the first fenced block wins; its closing fence must start
/// a line or end the content.
pub fn strip_markdown_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    let Some(start) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let inner = &trimmed[start + FENCE.len()..];
    let inner = match inner.find(CLOSING_FENCE) {
        Some(end) => &inner[..end],
        None => inner.trim_end().strip_suffix(FENCE).unwrap_or(inner),
    };
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

/// Unwrap, parse and schema-check model output.
pub fn decode_analysis(content: &str) -> Result<AnalysisResult, LlmError> {
    let value: Value = serde_json::from_str(strip_markdown_fence(content))
        .map_err(|e| LlmError::Parse(e.to_string()))?;

    if !validate(&value) {
        return Err(LlmError::Schema);
    }

    serde_json::from_value(value).map_err(|e| LlmError::Parse(e.to_string()))
}

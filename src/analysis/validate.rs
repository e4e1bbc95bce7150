//! Structural check for AI-produced analysis results.

use serde_json::{Map, Value};

use crate::models::RiskLevel;

const ISSUE_FIELDS: [&str; 4] = ["id", "title", "short", "long"];

/// Whether `value` satisfies the `AnalysisResult` contract.
///
/// Unknown extra fields are tolerated. Never panics, whatever the shape.
pub fn validate(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let risk_ok = obj
        .get("riskLevel")
        .and_then(Value::as_str)
        .and_then(RiskLevel::from_str)
        .is_some();
    let summary_ok = obj.get("summary").is_some_and(Value::is_string);
    let issues_ok = obj
        .get("detectedIssues")
        .and_then(Value::as_array)
        .is_some_and(|issues| issues.iter().all(is_valid_issue));

    risk_ok && summary_ok && issues_ok
}

fn is_valid_issue(issue: &Value) -> bool {
    issue.as_object().is_some_and(has_string_fields)
}

fn has_string_fields(issue: &Map<String, Value>) -> bool {
    ISSUE_FIELDS
        .iter()
        .all(|field| issue.get(*field).is_some_and(Value::is_string))
}

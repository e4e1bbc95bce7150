//! Turns a raw request body into canonical [`Answers`].
//!
//! The request envelope is explicit: answers must live under a top-level
//! `answers` field, either as an object or as a JSON-encoded string. The
//! body itself may arrive as an already-decoded object or as a JSON string
//! holding that object.

use serde_json::Value;
use thiserror::Error;

use crate::models::Answers;

/// Client-side input problems. These are the only failures surfaced to
/// callers as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Answers field is required")]
    Missing,

    #[error("Invalid JSON format in answers field")]
    InvalidJson,

    #[error("Answers must be a valid JSON object")]
    NotAnObject,
}

/// Extract and validate answers from a request body.
pub fn normalize(raw_body: &Value) -> Result<Answers, InputError> {
    // A double-encoded body: the whole envelope arrived as a JSON string.
    let decoded;
    let body = match raw_body {
        Value::String(text) => {
            decoded = serde_json::from_str::<Value>(text).map_err(|_| InputError::Missing)?;
            &decoded
        }
        other => other,
    };

    let answers = match body.as_object().and_then(|obj| obj.get("answers")) {
        None | Some(Value::Null) => return Err(InputError::Missing),
        Some(value) => value,
    };

    normalize_answers(answers)
}

/// Validate the value of the `answers` field itself.
pub fn normalize_answers(answers: &Value) -> Result<Answers, InputError> {
    match answers {
        Value::String(text) if text.trim().is_empty() => Err(InputError::Missing),
        Value::String(text) => {
            let parsed: Value =
                serde_json::from_str(text).map_err(|_| InputError::InvalidJson)?;
            into_answers(parsed)
        }
        Value::Null => Err(InputError::Missing),
        other => into_answers(other.clone()),
    }
}

fn into_answers(value: Value) -> Result<Answers, InputError> {
    match value {
        Value::Object(map) => Ok(Answers::from_map(map)),
        _ => Err(InputError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_answers() {
        let body = json!({"answers": {"itrForm": "ITR-1", "hasCapitalGains": true}});
        let answers = normalize(&body).unwrap();
        assert_eq!(answers.get("itrForm"), Some(&json!("ITR-1")));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn test_string_answers_are_parsed() {
        let body = json!({"answers": r#"{"itrForm":"ITR-2","salary":1200000}"#});
        let answers = normalize(&body).unwrap();
        assert_eq!(answers.get("salary"), Some(&json!(1200000)));
    }

    #[test]
    fn test_double_encoded_body() {
        let body = Value::String(r#"{"answers":{"itrForm":"ITR-1"}}"#.to_string());
        let answers = normalize(&body).unwrap();
        assert_eq!(answers.get("itrForm"), Some(&json!("ITR-1")));
    }

    #[test]
    fn test_missing_answers() {
        assert_eq!(normalize(&json!({})), Err(InputError::Missing));
        assert_eq!(normalize(&json!({"answers": null})), Err(InputError::Missing));
        assert_eq!(normalize(&json!({"answers": "  "})), Err(InputError::Missing));
        assert_eq!(normalize(&json!([1, 2])), Err(InputError::Missing));
        assert_eq!(normalize(&Value::Null), Err(InputError::Missing));
    }

    #[test]
    fn test_whole_body_is_not_sniffed() {
        // Without an explicit envelope the body is not treated as answers.
        let body = json!({"itrForm": "ITR-1", "hasCapitalGains": true});
        assert_eq!(normalize(&body), Err(InputError::Missing));
    }

    #[test]
    fn test_invalid_json_string() {
        let body = json!({"answers": "{not valid json"});
        let err = normalize(&body).unwrap_err();
        assert_eq!(err, InputError::InvalidJson);
        assert_eq!(err.to_string(), "Invalid JSON format in answers field");
    }

    #[test]
    fn test_non_object_answers() {
        for answers in [json!([1, 2]), json!(42), json!(true), json!("[1,2]"), json!("\"x\"")] {
            let body = json!({ "answers": answers });
            assert_eq!(normalize(&body), Err(InputError::NotAnObject), "{}", body);
        }
        assert_eq!(
            normalize(&json!({"answers": "null"})),
            Err(InputError::NotAnObject)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(InputError::Missing.to_string(), "Answers field is required");
        assert_eq!(
            InputError::NotAnObject.to_string(),
            "Answers must be a valid JSON object"
        );
    }
}

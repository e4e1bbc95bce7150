//! Questionnaire answers.

use serde::Serialize;
use serde_json::{Map, Value};

/// Question-wizard responses for one request.
///
/// Open-ended: any JSON object is accepted (ITR form choice, booleans,
/// numeric fields, ...). Only the normalizer constructs these, so a value of
/// this type is always a non-null, non-array object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answers(Map<String, Value>);

impl Answers {
    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a single answer.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Pretty-printed JSON for embedding in prompts.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }
}

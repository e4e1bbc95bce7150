//! Questionnaire analysis endpoint.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde_json::Value;

use super::super::error::ApiError;
use super::super::upload::read_analysis_form;
use super::super::AppState;
use crate::models::AnalysisResult;

/// `POST /api/analyze` with either a JSON or a multipart body.
pub async fn analyze(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalysisResult>, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let (body, documents) = if is_multipart {
        let multipart = Multipart::from_request(request, &state).await?;
        let form = read_analysis_form(multipart).await?;
        (form.body, form.documents)
    } else {
        let bytes = Bytes::from_request(request, &state).await?;
        (parse_json_body(&bytes)?, Vec::new())
    };

    let result = state.analysis.run(&body, &documents).await?;
    Ok(Json(result))
}

/// Decode a JSON body; an empty body carries no answers.
fn parse_json_body(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|_| ApiError::InvalidBody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json_body(b"").unwrap(), Value::Null);
        assert_eq!(parse_json_body(b"  \n").unwrap(), Value::Null);
        assert_eq!(
            parse_json_body(br#"{"answers":{}}"#).unwrap(),
            json!({"answers": {}})
        );
        assert!(matches!(parse_json_body(b"{oops"), Err(ApiError::InvalidBody)));
    }
}

//! Request body extraction for write endpoints.
//!
//! axum의 `Json` 추출기는 `Content-Type`이 없거나 body가 비어 있으면
//! 스키마 검증 전에 문자열 하나로 거부함. 여기서는 그런 body를 `{}`로 보고
//! 검증기로 넘겨서, 누락된 필드마다 메시지가 나오도록 함.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// 스키마 검증 전의 JSON body
///
/// - JSON이 아닌 content type, 빈 body: `{}`
/// - JSON content type인데 파싱 실패: 400 (메시지 하나)
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest(format!("Failed to parse the request body as JSON: {e}")))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

//! Error Handling Module
//!
//! Provides type-safe error handling with proper HTTP status code mapping.
//! Uses thiserror for domain errors and integrates with tracing for structured logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// API 에러 타입
///
/// # Design Decision
///
/// 각 에러 variant는 적절한 HTTP 상태 코드에 매핑됨
/// - 스키마 위반: 400 (메시지 배열)
/// - 존재하지 않는 isbn: 404 (메시지 하나)
/// - 그 외 DB 에러: 500 (상세 내용은 로그에만)
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Validation failed: {}", .0.join(", "))]
    ValidationError(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    // ============ 404 Not Found ============
    #[error("{0}")]
    NotFound(String),

    // ============ 500 Internal Server Error ============
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 에러 메시지: 검증 실패는 배열, 나머지는 문자열
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// API 에러 응답 구조
///
/// ```json
/// {
///   "error": { "message": "There is no book with an isbn 'x'", "status": 404 },
///   "message": "There is no book with an isbn 'x'"
/// }
/// ```
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
    pub message: ErrorMessage,
}

#[derive(Serialize)]
pub struct ErrorDetails {
    pub message: ErrorMessage,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            ApiError::ValidationError(messages) => ErrorMessage::Many(messages),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => ErrorMessage::One(msg),
            ApiError::DatabaseError(detail) => {
                // 내부 에러는 클라이언트에 상세 정보 노출 안 함
                tracing::error!(%detail, "database error");
                ErrorMessage::One("Database error occurred".to_string())
            }
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                message: message.clone(),
                status: status.as_u16(),
            },
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// 데이터 접근 에러를 ApiError로 변환
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            not_found @ DbError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
            DbError::Sqlx(e) => ApiError::DatabaseError(format!("{e:?}")),
        }
    }
}

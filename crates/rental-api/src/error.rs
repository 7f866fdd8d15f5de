//! 통합 API 에러 응답 타입.
//!
//! 모든 엔드포인트는 실패 시 `{"error": "<message>"}` 형식으로 응답합니다.
//! 내부 에러(저장소 등)는 로그로만 남기고 일반 메시지를 반환합니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::repository::StoreError;

/// 내부 에러에 대한 일반 메시지.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API 에러 응답 본문.
///
/// # 예시
///
/// ```json
/// { "error": "Invalid credentials" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// 상태 코드와 함께 응답으로 변환합니다.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 일반 API 에러 (매물 라우트 등).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 요청 본문 형식 오류 또는 필드 검증 실패
    #[error("{0}")]
    Validation(String),

    /// 리소스를 찾을 수 없음
    #[error("{0}")]
    NotFound(String),

    /// 저장소 에러
    #[error("저장소 에러: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(rental_core::validation_message(&errors))
    }
}

impl ApiError {
    /// HTTP 상태 코드.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Store(e) => {
                error!(error = %e, "저장소 요청 실패");
                SERVER_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        ErrorResponse::new(message).into_response_with(status)
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

//! 인증 흐름 에러.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::{PasswordError, TokenError};
use crate::error::{ErrorResponse, SERVER_ERROR_MESSAGE};
use crate::repository::StoreError;

/// 인증 에러.
///
/// 자격증명 관련 메시지는 의도적으로 일반적입니다. 존재하지 않는 이메일과
/// 틀린 비밀번호는 같은 `InvalidCredentials`로 보고됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateUser,
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// 자격증명이 제시되지 않음
    #[error("Unauthorized")]
    Unauthorized,
    /// 자격증명이 제시되었으나 거부됨
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("저장소 에러: {0}")]
    Store(#[from] StoreError),
    #[error("비밀번호 해싱 에러: {0}")]
    Hash(#[from] PasswordError),
    #[error("토큰 발급 에러: {0}")]
    Token(#[from] TokenError),
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl AuthError {
    /// HTTP 상태 코드.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateUser | AuthError::InvalidCredentials | AuthError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Store(_) | AuthError::Hash(_) | AuthError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 내부 에러 여부 (로그 대상, 상세 내용 비노출).
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Store(_) | AuthError::Hash(_) | AuthError::Token(_)
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_internal() {
            error!(error = %self, "인증 요청 처리 실패");
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        ErrorResponse::new(message).into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Hash(PasswordError::HashingFailed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_generic() {
        let err = AuthError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(AuthError::DuplicateUser.to_string(), "User already exists");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}

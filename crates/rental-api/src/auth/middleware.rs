//! Axum용 JWT 인증 추출기.
//!
//! 보호된 핸들러에서 인증된 사용자 ID를 꺼내는 route guard입니다.
//!
//! - 헤더 없음 → `Unauthorized` (401)
//! - 헤더는 있으나 형식 오류/검증 실패/만료 → `Forbidden` (403)

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;
use uuid::Uuid;

use super::{AuthError, Claims};
use crate::state::AppState;

/// JWT 인증 추출기.
///
/// 토큰의 subject만 확인하며 사용자 존재 여부는 조회하지 않습니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(auth: AuthUser) -> impl IntoResponse {
///     format!("Authenticated user: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// 인증된 사용자 ID
    pub user_id: Uuid,
    /// 디코딩된 Claims
    pub claims: Claims,
}

/// Authorization 헤더에서 Bearer 토큰 추출.
///
/// 헤더가 없거나, 비어 있거나, `Bearer` 뒤에 토큰이 없으면 `Unauthorized`.
/// 다른 스킴이거나 읽을 수 없는 헤더는 `Forbidden`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AuthError::Unauthorized);
    };

    let value = value.to_str().map_err(|_| AuthError::Forbidden)?.trim();
    if value.is_empty() || value == "Bearer" {
        return Err(AuthError::Unauthorized);
    }

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some("") => Err(AuthError::Unauthorized),
        Some(token) => Ok(token),
        None => Err(AuthError::Forbidden),
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = state.auth.tokens().verify(token).map_err(|e| {
            debug!(error = %e, "토큰 검증 실패");
            AuthError::Forbidden
        })?;

        let user_id = claims.user_id().map_err(|_| {
            debug!("토큰 subject가 사용자 ID 형식이 아님");
            AuthError::Forbidden
        })?;

        Ok(AuthUser { user_id, claims })
    }
}

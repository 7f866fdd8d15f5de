//! 회원가입/로그인 흐름.

use std::sync::Arc;

use rental_core::{LoginCredentials, NewUser, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use super::{AuthError, PasswordHasher, TokenIssuer};
use crate::repository::{StoreError, UserStore};

/// 회원가입/로그인 성공 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// 인증 서비스.
///
/// 사용자 저장소, 비밀번호 해셔, 토큰 발급기를 묶어 회원가입과 로그인을
/// 처리합니다. 모든 구성 요소는 부팅 후 읽기 전용입니다.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// 사용자 저장소.
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// 토큰 발급/검증기.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// 회원가입.
    ///
    /// # Errors
    ///
    /// - `AuthError::Validation`: 필수 필드 누락 또는 이메일 형식 오류
    /// - `AuthError::DuplicateUser`: 이미 가입된 이메일 (대소문자 무시)
    pub async fn register(&self, input: NewUser) -> Result<TokenResponse, AuthError> {
        // 로그인과 같은 기준으로 이메일을 다루도록 검증 전에 정규화
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| AuthError::Validation(rental_core::validation_message(&e)))?;

        let email = input.normalized_email();
        if self.users.find_by_email(&email).await?.is_some() {
            debug!(email = %email, "이미 가입된 이메일");
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = self.hasher.hash_blocking(input.password.clone()).await?;
        let record = UserRecord::from_new_user(&input, password_hash);

        // 조회 이후 동시 가입은 고유 인덱스에서 걸림
        let user = self.users.insert(record).await.map_err(|e| match e {
            StoreError::Duplicate(_) => AuthError::DuplicateUser,
            other => AuthError::Store(other),
        })?;

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "사용자 가입 완료");

        Ok(TokenResponse { token })
    }

    /// 로그인.
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 구분하지 않습니다.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<TokenResponse, AuthError> {
        let email = credentials.normalized_email();
        let Some(user) = self.users.find_by_email(&email).await? else {
            // 계정 존재 여부가 응답 시간으로 드러나지 않도록 같은 비용의 검증 수행
            self.hasher.verify_dummy_blocking(credentials.password).await;
            debug!("로그인 실패: 알 수 없는 이메일");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = self
            .hasher
            .verify_blocking(credentials.password, user.password_hash.clone())
            .await;
        if !valid {
            debug!(user_id = %user.id, "로그인 실패: 비밀번호 불일치");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "로그인 성공");

        Ok(TokenResponse { token })
    }
}

//! JWT 토큰 처리.
//!
//! 사용자 ID를 담은 Access Token 발급/검증 로직.
//! 서명 키는 부팅 시 한 번 로드되며 이후 변경되지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp). 만료 미설정 시 없음.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `expires_in` - 만료 기간 (없으면 만료되지 않음)
    pub fn new(user_id: Uuid, expires_in: Option<Duration>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_in.map(|d| (now + d).timestamp()),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now().timestamp() > exp)
    }

    /// Subject를 사용자 ID로 파싱.
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidToken)
    }
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("토큰이 만료되었습니다")]
    ExpiredToken,
}

/// 토큰 발급/검증기.
///
/// HS256 서명을 사용합니다. `Arc`로 공유되며 읽기 전용입니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Option<Duration>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// 비밀 키로 발급기 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - 서명 비밀 키
    /// * `expires_in_minutes` - 만료 시간 (분). `None`이면 `exp` 클레임 없이 발급
    pub fn new(secret: &str, expires_in_minutes: Option<i64>) -> Self {
        let expires_in = expires_in_minutes.map(Duration::minutes);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        if expires_in.is_none() {
            // exp가 없는 토큰도 허용 (있으면 여전히 검사)
            validation.required_spec_claims.clear();
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        }
    }

    /// 사용자 ID에 대한 토큰 발급.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.encode(&Claims::new(user_id, self.expires_in))
    }

    /// Claims를 그대로 서명합니다.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(TokenError::from)
    }

    /// 토큰 디코딩 및 검증.
    ///
    /// # Errors
    ///
    /// - `TokenError::ExpiredToken`: 만료된 토큰
    /// - `TokenError::InvalidToken`: 서명 불일치, 형식 오류, 잘못된 subject
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            },
        )?;

        Ok(data.claims)
    }

    /// 토큰을 검증하고 사용자 ID를 반환합니다.
    pub fn verify_subject(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify(token)?.user_id()
    }
}

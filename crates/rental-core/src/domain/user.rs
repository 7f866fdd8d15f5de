//! 사용자 도메인 모델.
//!
//! 평문 비밀번호는 [`NewUser`]와 [`LoginCredentials`]에만 존재하며,
//! 저장되는 [`User`]는 해시만 보관합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::validate_not_blank;

/// 저장된 사용자 레코드.
///
/// `password_hash`는 직렬화되지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    /// 자유 형식 역할 문자열 (예: "owner", "renter")
    pub role: String,
    pub phone_number: String,
    /// 정규화된 이메일 (소문자)
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// 회원가입 입력.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub role: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub phone_number: String,
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
}

impl NewUser {
    /// 정규화된 이메일.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// 앞뒤 공백을 제거하고 이메일을 정규화한 입력.
    ///
    /// 검증 전에 호출해야 로그인과 같은 기준으로 이메일을 다룹니다.
    /// 비밀번호는 그대로 둡니다.
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            role: self.role.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 로그인 입력.
#[derive(Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    /// 정규화된 이메일.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 저장소에 넘기는 사용자 레코드 (해시 완료 상태).
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub full_name: String,
    pub role: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
}

impl UserRecord {
    /// 검증된 입력과 해시로 레코드를 만듭니다. 이메일은 정규화됩니다.
    pub fn from_new_user(input: &NewUser, password_hash: String) -> Self {
        Self {
            full_name: input.full_name.trim().to_string(),
            role: input.role.trim().to_string(),
            phone_number: input.phone_number.trim().to_string(),
            email: input.normalized_email(),
            password_hash,
        }
    }
}

/// 이메일을 비교용으로 정규화합니다 (앞뒤 공백 제거, 소문자).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

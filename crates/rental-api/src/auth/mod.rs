//! 인증.
//!
//! 비밀번호 해싱, JWT 발급/검증, 회원가입/로그인 흐름, 보호 라우트용
//! 추출기를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`PasswordHasher`]: Argon2id 해싱 및 검증
//! - [`TokenIssuer`]: HS256 토큰 발급/검증기
//! - [`AuthService`]: 회원가입/로그인
//! - [`AuthUser`]: Axum용 Bearer 토큰 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(auth: AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", auth.user_id)
//! }
//! ```

mod error;
mod jwt;
mod middleware;
mod password;
mod service;

pub use error::AuthError;
pub use jwt::{Claims, TokenError, TokenIssuer};
pub use middleware::{bearer_token, AuthUser};
pub use password::{PasswordError, PasswordHasher};
pub use service::{AuthService, TokenResponse};

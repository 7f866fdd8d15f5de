//! 주택 임대 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 회원가입/로그인 및 JWT 인증
//! - 매물 CRUD
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 비밀번호 해싱, JWT, 인증 추출기
//! - [`repository`]: 사용자/매물 저장소
//! - [`error`]: 공통 에러 응답

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{AuthError, AuthService, AuthUser, Claims, PasswordHasher, TokenIssuer};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, TEST_JWT_SECRET};

//! REST API 라우트.
//!
//! # 라우트 구성
//!
//! - `/` - 서버 동작 확인 문구
//! - `/register`, `/login`, `/protected` - 인증
//! - `/houses` - 매물 CRUD
//! - `/health` - 헬스 체크

pub mod auth;
pub mod health;
pub mod houses;

pub use auth::{auth_router, ProtectedResponse};
pub use health::{health_router, ReadinessReport, StoreCheck, StoreChecks};
pub use houses::{houses_router, DeleteResponse};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 루트 경로 응답 문구.
pub const ROOT_MESSAGE: &str = "House Rent server is running";

async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .merge(auth_router())
        .nest("/houses", houses_router())
        .nest("/health", health_router())
}

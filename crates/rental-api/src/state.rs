//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 부팅 시 한 번 구성되고 이후 변경되지 않습니다.
//! Arc로 래핑되어 여러 요청 간에 공유됩니다.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::repository::HouseStore;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 회원가입/로그인 및 토큰 검증
    pub auth: AuthService,

    /// 매물 저장소
    pub houses: Arc<dyn HouseStore>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(auth: AuthService, houses: Arc<dyn HouseStore>) -> Self {
        Self {
            auth,
            houses,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 AppState 생성.
///
/// 인메모리 저장소와 낮은 비용의 해셔를 사용합니다. 토큰은 만료되지 않습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::auth::{PasswordHasher, TokenIssuer};
    use crate::repository::{MemoryHouseStore, MemoryUserStore};
    use rental_core::PasswordConfig;

    let hasher = PasswordHasher::new(&PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("test password params are valid");

    let auth = AuthService::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(hasher),
        Arc::new(TokenIssuer::new(TEST_JWT_SECRET, None)),
    );

    AppState::new(auth, Arc::new(MemoryHouseStore::new()))
}

/// 테스트 상태의 서명 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

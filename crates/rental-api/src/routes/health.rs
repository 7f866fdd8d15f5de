//! 헬스 체크 라우트
//!
//! - `GET /health` - 프로세스 생존 확인
//! - `GET /health/ready` - 사용자/매물 저장소에 실제로 닿는지 확인.
//!   하나라도 실패하면 503.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::repository::StoreError;
use crate::state::AppState;

/// 저장소 하나의 점검 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoreCheck {
    Up,
    Down { error: String },
}

impl StoreCheck {
    fn from_result(store: &'static str, result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => StoreCheck::Up,
            Err(e) => {
                warn!(store, error = %e, "저장소 점검 실패");
                // 상세 원인은 로그에만 남김
                StoreCheck::Down {
                    error: "연결 실패".to_string(),
                }
            }
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, StoreCheck::Up)
    }
}

/// 저장소별 점검 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChecks {
    pub users: StoreCheck,
    pub houses: StoreCheck,
}

/// readiness 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub ready: bool,
    pub version: String,
    pub uptime_secs: i64,
    pub stores: StoreChecks,
}

/// GET /health
async fn liveness() -> &'static str {
    "OK"
}

/// GET /health/ready
async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ReadinessReport>) {
    let (users, houses) = tokio::join!(
        state.auth.users().health_check(),
        state.houses.health_check()
    );

    let stores = StoreChecks {
        users: StoreCheck::from_result("users", users),
        houses: StoreCheck::from_result("houses", houses),
    };
    let ready = stores.users.is_up() && stores.houses.is_up();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let report = ReadinessReport {
        ready,
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        stores,
    };
    (status, Json(report))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(liveness))
        .route("/ready", get(readiness))
}

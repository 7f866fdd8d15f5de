//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 저장소는 trait 뒤에 숨겨져 있어 PostgreSQL 구현과 인메모리 구현을
//! 교체할 수 있습니다.

pub mod houses;
pub mod users;

use sqlx::PgPool;
use tracing::info;

pub use houses::{HouseStore, PgHouseStore};
pub use users::{PgUserStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use houses::MemoryHouseStore;
#[cfg(any(test, feature = "test-utils"))]
pub use users::MemoryUserStore;

/// PostgreSQL 고유 제약 조건 위반 코드.
const UNIQUE_VIOLATION: &str = "23505";

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 고유 제약 조건 위반
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// 데이터베이스 에러
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Duplicate(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// 데이터베이스 마이그레이션을 실행합니다.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Migrations completed successfully");
    Ok(())
}

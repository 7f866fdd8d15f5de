//! User Repository
//!
//! 사용자 자격증명 저장소. 이메일은 호출 전에 정규화되어 있어야 하며,
//! 저장소가 이메일 고유성을 보장합니다.

use async_trait::async_trait;
use rental_core::{User, UserRecord};
use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;

/// 사용자 저장소 trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자 조회.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// 사용자 저장. ID는 저장소가 생성합니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate`: 같은 이메일이 이미 존재
    /// - `StoreError::Database`: 연결/쿼리 실패
    async fn insert(&self, record: UserRecord) -> Result<User, StoreError>;

    /// 저장소 연결 상태 확인.
    async fn health_check(&self) -> Result<(), StoreError>;
}

// ================================================================================================
// PostgreSQL
// ================================================================================================

/// PostgreSQL 사용자 저장소.
///
/// `users.email`의 고유 인덱스가 동시 회원가입 경쟁을 막습니다.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, record: UserRecord) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, role, phone_number, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&record.full_name)
        .bind(&record.role)
        .bind(&record.phone_number)
        .bind(&record.email)
        .bind(&record.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ================================================================================================
// In-memory
// ================================================================================================

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryUserStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Utc;
    use rental_core::{User, UserRecord};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::{StoreError, UserStore};

    /// 인메모리 사용자 저장소 (테스트용).
    ///
    /// 중복 확인과 삽입이 하나의 쓰기 잠금 안에서 일어납니다.
    #[derive(Debug, Default)]
    pub struct MemoryUserStore {
        users: RwLock<HashMap<Uuid, User>>,
    }

    impl MemoryUserStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// 저장된 사용자 수.
        pub async fn len(&self) -> usize {
            self.users.read().await.len()
        }

        /// 저장된 사용자가 없는지 여부.
        pub async fn is_empty(&self) -> bool {
            self.users.read().await.is_empty()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn insert(&self, record: UserRecord) -> Result<User, StoreError> {
            let mut users = self.users.write().await;
            if users.values().any(|u| u.email == record.email) {
                return Err(StoreError::Duplicate(format!(
                    "email already registered: {}",
                    record.email
                )));
            }

            let user = User {
                id: Uuid::new_v4(),
                full_name: record.full_name,
                role: record.role,
                phone_number: record.phone_number,
                email: record.email,
                password_hash: record.password_hash,
                created_at: Utc::now(),
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str) -> UserRecord {
        UserRecord {
            full_name: "Rahim Uddin".to_string(),
            role: "owner".to_string(),
            phone_number: "01712345678".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryUserStore::new();
        let user = store.insert(record("a@x.com")).await.unwrap();

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");

        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        assert!(store.is_empty().await);
        store.insert(record("a@x.com")).await.unwrap();

        let result = store.insert(record("a@x.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        assert_eq!(store.len().await, 1);
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(MemoryUserStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(record("race@x.com")).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.len().await, 1);
    }
}

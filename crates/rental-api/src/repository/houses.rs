//! House Repository
//!
//! 주택 매물 CRUD 연산을 담당합니다.

use async_trait::async_trait;
use rental_core::{House, HouseInput};
use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;

/// 주택 매물 저장소 trait.
#[async_trait]
pub trait HouseStore: Send + Sync {
    /// 매물 생성.
    async fn create(&self, input: HouseInput) -> Result<House, StoreError>;

    /// 전체 매물 조회 (최신순).
    async fn list(&self) -> Result<Vec<House>, StoreError>;

    /// 매물 상세 조회.
    async fn get(&self, id: Uuid) -> Result<Option<House>, StoreError>;

    /// 매물 수정. 없으면 `None`.
    async fn update(&self, id: Uuid, input: HouseInput) -> Result<Option<House>, StoreError>;

    /// 매물 삭제. 삭제되었으면 `true`.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// 저장소 연결 상태 확인.
    async fn health_check(&self) -> Result<(), StoreError>;
}

// ================================================================================================
// PostgreSQL
// ================================================================================================

/// PostgreSQL 주택 매물 저장소.
#[derive(Debug, Clone)]
pub struct PgHouseStore {
    pool: PgPool,
}

impl PgHouseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HouseStore for PgHouseStore {
    async fn create(&self, input: HouseInput) -> Result<House, StoreError> {
        let house = sqlx::query_as::<_, House>(
            r#"
            INSERT INTO houses (
                name, address, city, bedrooms, bathrooms, size, picture,
                availability_date, rent_per_month, phone_number, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(&input.size)
        .bind(&input.picture)
        .bind(input.availability_date)
        .bind(input.rent_per_month)
        .bind(&input.phone_number)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(house)
    }

    async fn list(&self) -> Result<Vec<House>, StoreError> {
        let houses =
            sqlx::query_as::<_, House>("SELECT * FROM houses ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(houses)
    }

    async fn get(&self, id: Uuid) -> Result<Option<House>, StoreError> {
        let house = sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(house)
    }

    async fn update(&self, id: Uuid, input: HouseInput) -> Result<Option<House>, StoreError> {
        let house = sqlx::query_as::<_, House>(
            r#"
            UPDATE houses SET
                name = $2,
                address = $3,
                city = $4,
                bedrooms = $5,
                bathrooms = $6,
                size = $7,
                picture = $8,
                availability_date = $9,
                rent_per_month = $10,
                phone_number = $11,
                description = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(&input.size)
        .bind(&input.picture)
        .bind(input.availability_date)
        .bind(input.rent_per_month)
        .bind(&input.phone_number)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(house)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1 FROM houses LIMIT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ================================================================================================
// In-memory
// ================================================================================================

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryHouseStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use rental_core::{House, HouseInput};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::{HouseStore, StoreError};

    /// 인메모리 주택 매물 저장소 (테스트용).
    #[derive(Debug, Default)]
    pub struct MemoryHouseStore {
        houses: RwLock<HashMap<Uuid, House>>,
    }

    impl MemoryHouseStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl HouseStore for MemoryHouseStore {
        async fn create(&self, input: HouseInput) -> Result<House, StoreError> {
            let house = House::from_input(Uuid::new_v4(), input);
            self.houses.write().await.insert(house.id, house.clone());
            Ok(house)
        }

        async fn list(&self) -> Result<Vec<House>, StoreError> {
            let mut houses: Vec<House> = self.houses.read().await.values().cloned().collect();
            houses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(houses)
        }

        async fn get(&self, id: Uuid) -> Result<Option<House>, StoreError> {
            Ok(self.houses.read().await.get(&id).cloned())
        }

        async fn update(&self, id: Uuid, input: HouseInput) -> Result<Option<House>, StoreError> {
            let mut houses = self.houses.write().await;
            Ok(houses.get_mut(&id).map(|house| {
                house.apply(input);
                house.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
            Ok(self.houses.write().await.remove(&id).is_some())
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }
}

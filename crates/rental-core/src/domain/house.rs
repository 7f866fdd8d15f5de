//! 주택 매물 도메인 모델.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validation::{validate_non_negative, validate_not_blank, validate_phone_number};

/// 저장된 주택 매물.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// 면적 (예: "1200 sqft")
    pub size: String,
    /// 사진 URL
    pub picture: String,
    pub availability_date: DateTime<Utc>,
    pub rent_per_month: Decimal,
    pub phone_number: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 주택 생성/수정 입력.
///
/// 모든 필드가 필수입니다. 수정 시에도 전체 필드를 교체합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HouseInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    #[validate(range(min = 0, message = "침실 수는 0 이상이어야 합니다"))]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "욕실 수는 0 이상이어야 합니다"))]
    pub bathrooms: i32,
    #[validate(custom(function = "validate_not_blank"))]
    pub size: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub picture: String,
    pub availability_date: DateTime<Utc>,
    #[validate(custom(function = "validate_non_negative"))]
    pub rent_per_month: Decimal,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
}

impl House {
    /// 입력으로 새 매물을 만듭니다.
    pub fn from_input(id: Uuid, input: HouseInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            address: input.address,
            city: input.city,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            size: input.size,
            picture: input.picture,
            availability_date: input.availability_date,
            rent_per_month: input.rent_per_month,
            phone_number: input.phone_number,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// 입력으로 전체 필드를 교체합니다. `id`와 `created_at`은 유지됩니다.
    pub fn apply(&mut self, input: HouseInput) {
        self.name = input.name;
        self.address = input.address;
        self.city = input.city;
        self.bedrooms = input.bedrooms;
        self.bathrooms = input.bathrooms;
        self.size = input.size;
        self.picture = input.picture;
        self.availability_date = input.availability_date;
        self.rent_per_month = input.rent_per_month;
        self.phone_number = input.phone_number;
        self.description = input.description;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> HouseInput {
        HouseInput {
            name: "Lake View".to_string(),
            address: "House 12, Road 5".to_string(),
            city: "Dhaka".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            size: "1400 sqft".to_string(),
            picture: "https://example.com/house.jpg".to_string(),
            availability_date: Utc::now(),
            rent_per_month: dec!(25000),
            phone_number: "01712345678".to_string(),
            description: "Bright flat near the lake".to_string(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_invalid_phone_number() {
        let mut house = input();
        house.phone_number = "12345".to_string();
        let errors = house.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut house = input();
        house.bedrooms = -1;
        house.rent_per_month = dec!(-100);
        let errors = house.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("bedrooms"));
        assert!(fields.contains_key("rent_per_month"));
    }

    #[test]
    fn test_deserialize_numbers_and_dates() {
        let json = r#"{
            "name": "Green Villa",
            "address": "Road 7",
            "city": "Chattogram",
            "bedrooms": 2,
            "bathrooms": 1,
            "size": "900 sqft",
            "picture": "https://example.com/v.jpg",
            "availabilityDate": "2024-03-01T00:00:00Z",
            "rentPerMonth": 12000,
            "phoneNumber": "+8801812345678",
            "description": "Quiet area"
        }"#;
        let house: HouseInput = serde_json::from_str(json).unwrap();
        assert_eq!(house.rent_per_month, dec!(12000));
        assert!(house.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut house = House::from_input(Uuid::new_v4(), input());
        let id = house.id;
        let created_at = house.created_at;

        let mut update = input();
        update.city = "Sylhet".to_string();
        house.apply(update);

        assert_eq!(house.id, id);
        assert_eq!(house.created_at, created_at);
        assert_eq!(house.city, "Sylhet");
    }
}

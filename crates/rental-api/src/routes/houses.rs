//! 매물 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /houses` - 매물 목록 (최신순)
//! - `POST /houses` - 매물 등록
//! - `GET /houses/{id}` - 매물 조회
//! - `PUT /houses/{id}` - 매물 수정 (전체 필드)
//! - `DELETE /houses/{id}` - 매물 삭제

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rental_core::{House, HouseInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const HOUSE_NOT_FOUND: &str = "House not found";

/// 삭제 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// 경로의 ID 파싱. 형식이 맞지 않는 ID는 존재하지 않는 매물로 취급합니다.
fn parse_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(HOUSE_NOT_FOUND.to_string()))
}

/// 본문 추출 + 필드 검증.
fn validated(body: Result<Json<HouseInput>, JsonRejection>) -> ApiResult<HouseInput> {
    let Json(input) = body?;
    input.validate()?;
    Ok(input)
}

/// GET /houses - 매물 목록
async fn list_houses(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<House>>> {
    let houses = state.houses.list().await?;
    debug!(count = houses.len(), "매물 목록 조회");
    Ok(Json(houses))
}

/// POST /houses - 매물 등록
async fn create_house(
    State(state): State<Arc<AppState>>,
    body: Result<Json<HouseInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<House>)> {
    let input = validated(body)?;
    let house = state.houses.create(input).await?;

    info!(house_id = %house.id, city = %house.city, "매물 등록");
    Ok((StatusCode::CREATED, Json(house)))
}

/// GET /houses/{id} - 매물 조회
async fn get_house(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<House>> {
    let id = parse_id(&id)?;
    state
        .houses
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(HOUSE_NOT_FOUND.to_string()))
}

/// PUT /houses/{id} - 매물 수정
async fn update_house(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<HouseInput>, JsonRejection>,
) -> ApiResult<Json<House>> {
    let id = parse_id(&id)?;
    let input = validated(body)?;

    let house = state
        .houses
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::NotFound(HOUSE_NOT_FOUND.to_string()))?;

    info!(house_id = %house.id, "매물 수정");
    Ok(Json(house))
}

/// DELETE /houses/{id} - 매물 삭제
async fn delete_house(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    if !state.houses.delete(id).await? {
        return Err(ApiError::NotFound(HOUSE_NOT_FOUND.to_string()));
    }

    info!(house_id = %id, "매물 삭제");
    Ok(Json(DeleteResponse {
        message: "House deleted successfully".to_string(),
    }))
}

/// 매물 라우터 생성.
pub fn houses_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_houses).post(create_house))
        .route(
            "/{id}",
            get(get_house).put(update_house).delete(delete_house),
        )
}

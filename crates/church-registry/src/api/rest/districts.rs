use axum::extract::{Extension, Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiResult;
use crate::api::state::AppState;
use crate::domain::model::District;
use crate::domain::service::districts::{
    DistrictListParams, DistrictPayload, DistrictStatistics,
};

const COLLECTION: &str = "/api/districts/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistrictDto {
    pub id: i32,
    /// Derived display identifier, e.g. `DIS007`.
    pub district_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<District> for DistrictDto {
    fn from(district: District) -> Self {
        Self {
            district_id: district.display_id(),
            id: district.id,
            name: district.name,
            created_at: district.created_at,
            updated_at: district.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistrictSummaryDto {
    pub district: DistrictDto,
    pub sections_count: u64,
    pub churches_count: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkDistrictsRequest {
    #[serde(default)]
    pub districts: Option<Vec<DistrictPayload>>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<DistrictListParams>,
) -> ApiResult<Json<Vec<DistrictDto>>> {
    let rows = state
        .districts
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DistrictPayload>,
) -> ApiResult<impl IntoResponse> {
    let district = state
        .districts
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(DistrictDto::from(district))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<DistrictDto>> {
    let district = state
        .districts
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(district.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DistrictPayload>,
) -> ApiResult<Json<DistrictDto>> {
    let district = state
        .districts
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(district.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DistrictPayload>,
) -> ApiResult<Json<DistrictDto>> {
    let district = state
        .districts
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(district.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .districts
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<DistrictStatistics>> {
    let stats = state
        .districts
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/districts/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<DistrictSummaryDto>> {
    let summary = state
        .districts
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(DistrictSummaryDto {
        district: summary.district.into(),
        sections_count: summary.sections_count,
        churches_count: summary.churches_count,
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkDistrictsRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .districts
        .bulk_create(body.districts.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/districts/bulk_create/"))?;
    let dtos: Vec<DistrictDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

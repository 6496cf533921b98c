use axum::extract::{Extension, Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiResult;
use crate::api::rest::church_pastors::ChurchPastorDto;
use crate::api::state::AppState;
use crate::domain::model::Church;
use crate::domain::service::churches::{ChurchListParams, ChurchPayload, ChurchStatistics};

const COLLECTION: &str = "/api/churches/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchDto {
    pub id: i32,
    /// Derived display identifier, e.g. `CHU001`.
    pub church_id: String,
    /// Parent section primary key.
    pub section: i32,
    pub section_name: String,
    pub church_name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Church> for ChurchDto {
    fn from(church: Church) -> Self {
        Self {
            church_id: church.display_id(),
            id: church.id,
            section: church.section_id,
            section_name: church.section_name,
            church_name: church.church_name,
            location: church.location,
            created_at: church.created_at,
            updated_at: church.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchSummaryDto {
    pub church: ChurchDto,
    pub pastors_count: u64,
    pub assignments: Vec<ChurchPastorDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkChurchesRequest {
    #[serde(default)]
    pub churches: Option<Vec<ChurchPayload>>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<ChurchListParams>,
) -> ApiResult<Json<Vec<ChurchDto>>> {
    let rows = state
        .churches
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ChurchPayload>,
) -> ApiResult<impl IntoResponse> {
    let church = state
        .churches
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(ChurchDto::from(church))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchDto>> {
    let church = state
        .churches
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(church.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchPayload>,
) -> ApiResult<Json<ChurchDto>> {
    let church = state
        .churches
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(church.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchPayload>,
) -> ApiResult<Json<ChurchDto>> {
    let church = state
        .churches
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(church.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .churches
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<ChurchStatistics>> {
    let stats = state
        .churches
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/churches/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchSummaryDto>> {
    let summary = state
        .churches
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(ChurchSummaryDto {
        church: summary.church.into(),
        pastors_count: summary.assignments.len() as u64,
        assignments: summary.assignments.into_iter().map(Into::into).collect(),
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkChurchesRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .churches
        .bulk_create(body.churches.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/churches/bulk_create/"))?;
    let dtos: Vec<ChurchDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

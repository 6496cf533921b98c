use axum::extract::{Extension, Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiResult;
use crate::api::state::AppState;
use crate::domain::fields::RoleName;
use crate::domain::model::ChurchPastor;
use crate::domain::service::church_pastors::{
    ChurchPastorListParams, ChurchPastorPayload, ChurchPastorStatistics,
};

const COLLECTION: &str = "/api/church-pastors/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchPastorDto {
    pub id: i32,
    /// Derived display identifier, e.g. `ASG001`.
    pub assignment_id: String,
    /// Church primary key.
    pub church: i32,
    pub church_name: String,
    /// Pastor primary key.
    pub pastor: i32,
    pub pastor_name: String,
    /// Role primary key.
    pub role: i32,
    pub role_name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChurchPastor> for ChurchPastorDto {
    fn from(assignment: ChurchPastor) -> Self {
        Self {
            assignment_id: assignment.display_id(),
            id: assignment.id,
            church: assignment.church_id,
            church_name: assignment.church_name,
            pastor: assignment.pastor_id,
            pastor_name: assignment.pastor_name,
            role: assignment.role_id,
            role_name: assignment.role_name,
            created_at: assignment.created_at,
            updated_at: assignment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchPastorSummaryDto {
    pub assignment: ChurchPastorDto,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkChurchPastorsRequest {
    #[serde(default)]
    pub church_pastors: Option<Vec<ChurchPastorPayload>>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<ChurchPastorListParams>,
) -> ApiResult<Json<Vec<ChurchPastorDto>>> {
    let rows = state
        .church_pastors
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ChurchPastorPayload>,
) -> ApiResult<impl IntoResponse> {
    let assignment = state
        .church_pastors
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(ChurchPastorDto::from(assignment))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchPastorDto>> {
    let assignment = state
        .church_pastors
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(assignment.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchPastorPayload>,
) -> ApiResult<Json<ChurchPastorDto>> {
    let assignment = state
        .church_pastors
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(assignment.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchPastorPayload>,
) -> ApiResult<Json<ChurchPastorDto>> {
    let assignment = state
        .church_pastors
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(assignment.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .church_pastors
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<ChurchPastorStatistics>> {
    let stats = state
        .church_pastors
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/church-pastors/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchPastorSummaryDto>> {
    let assignment = state
        .church_pastors
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(ChurchPastorSummaryDto {
        assignment: assignment.into(),
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkChurchPastorsRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .church_pastors
        .bulk_create(body.church_pastors.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/church-pastors/bulk_create/"))?;
    let dtos: Vec<ChurchPastorDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

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
use crate::domain::model::ChurchRole;
use crate::domain::service::church_roles::{
    ChurchRoleListParams, ChurchRolePayload, ChurchRoleStatistics,
};

const COLLECTION: &str = "/api/church-roles/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchRoleDto {
    pub id: i32,
    /// Derived display identifier, e.g. `ROL001`.
    pub role_id: String,
    pub role_name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChurchRole> for ChurchRoleDto {
    fn from(role: ChurchRole) -> Self {
        Self {
            role_id: role.display_id(),
            id: role.id,
            role_name: role.role_name,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchRoleSummaryDto {
    pub role: ChurchRoleDto,
    pub assignments_count: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkChurchRolesRequest {
    #[serde(default)]
    pub church_roles: Option<Vec<ChurchRolePayload>>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<ChurchRoleListParams>,
) -> ApiResult<Json<Vec<ChurchRoleDto>>> {
    let rows = state
        .church_roles
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ChurchRolePayload>,
) -> ApiResult<impl IntoResponse> {
    let role = state
        .church_roles
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(ChurchRoleDto::from(role))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchRoleDto>> {
    let role = state
        .church_roles
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(role.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchRolePayload>,
) -> ApiResult<Json<ChurchRoleDto>> {
    let role = state
        .church_roles
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(role.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ChurchRolePayload>,
) -> ApiResult<Json<ChurchRoleDto>> {
    let role = state
        .church_roles
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(role.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .church_roles
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<ChurchRoleStatistics>> {
    let stats = state
        .church_roles
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/church-roles/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ChurchRoleSummaryDto>> {
    let summary = state
        .church_roles
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(ChurchRoleSummaryDto {
        role: summary.role.into(),
        assignments_count: summary.assignments_count,
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkChurchRolesRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .church_roles
        .bulk_create(body.church_roles.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/church-roles/bulk_create/"))?;
    let dtos: Vec<ChurchRoleDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

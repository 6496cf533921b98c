use axum::extract::{Extension, Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiResult;
use crate::api::rest::districts::DistrictDto;
use crate::api::state::AppState;
use crate::domain::error::DomainError;
use crate::domain::model::Section;
use crate::domain::service::sections::{SectionListParams, SectionPayload, SectionStatistics};

const COLLECTION: &str = "/api/sections/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionDto {
    pub id: i32,
    /// Derived display identifier, e.g. `SEC001`.
    pub section_id: String,
    /// Parent district primary key.
    pub district: i32,
    pub district_name: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Section> for SectionDto {
    fn from(section: Section) -> Self {
        Self {
            section_id: section.display_id(),
            id: section.id,
            district: section.district_id,
            district_name: section.district_name,
            name: section.name,
            created_at: section.created_at,
            updated_at: section.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionSummaryDto {
    pub section: SectionDto,
    pub district: DistrictDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionsByDistrictResponse {
    pub district_id: i32,
    pub count: u64,
    pub sections: Vec<SectionDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkSectionsRequest {
    #[serde(default)]
    pub sections: Option<Vec<SectionPayload>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ByDistrictParams {
    pub district_id: Option<String>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<SectionListParams>,
) -> ApiResult<Json<Vec<SectionDto>>> {
    let rows = state
        .sections
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SectionPayload>,
) -> ApiResult<impl IntoResponse> {
    let section = state
        .sections
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(SectionDto::from(section))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<SectionDto>> {
    let section = state
        .sections
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(section.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SectionPayload>,
) -> ApiResult<Json<SectionDto>> {
    let section = state
        .sections
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(section.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SectionPayload>,
) -> ApiResult<Json<SectionDto>> {
    let section = state
        .sections
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(section.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .sections
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<SectionStatistics>> {
    let stats = state
        .sections
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/sections/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<SectionSummaryDto>> {
    let summary = state
        .sections
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(SectionSummaryDto {
        section: summary.section.into(),
        district: summary.district.into(),
    }))
}

pub async fn by_district(
    Extension(state): Extension<AppState>,
    Query(params): Query<ByDistrictParams>,
) -> ApiResult<Json<SectionsByDistrictResponse>> {
    const INSTANCE: &str = "/api/sections/by_district/";
    let raw = params.district_id.ok_or_else(|| {
        state.problem(
            &DomainError::BadRequest("district_id query parameter is required".to_owned()),
            INSTANCE,
        )
    })?;
    let district_id: i32 = raw.parse().map_err(|_| {
        state.problem(
            &DomainError::BadRequest("district_id must be an integer".to_owned()),
            INSTANCE,
        )
    })?;
    let rows = state
        .sections
        .by_district(district_id)
        .await
        .map_err(|e| state.problem(&e, INSTANCE))?;
    Ok(Json(SectionsByDistrictResponse {
        district_id,
        count: rows.len() as u64,
        sections: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkSectionsRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .sections
        .bulk_create(body.sections.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/sections/bulk_create/"))?;
    let dtos: Vec<SectionDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

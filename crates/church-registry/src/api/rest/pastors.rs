use axum::extract::{Extension, Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiResult;
use crate::api::state::AppState;
use crate::domain::fields::{Gender, PastorRank, PastorStatus};
use crate::domain::model::Pastor;
use crate::domain::service::pastors::{PastorListParams, PastorPayload, PastorStatistics};

const COLLECTION: &str = "/api/pastors/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorDto {
    pub id: i32,
    /// Derived display identifier, e.g. `PAS007`.
    pub pastor_id: String,
    pub full_name: String,
    pub gender: Gender,
    pub pastor_rank: PastorRank,
    pub national_id: Option<String>,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub start_of_service: Option<NaiveDate>,
    pub status: PastorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pastor> for PastorDto {
    fn from(pastor: Pastor) -> Self {
        Self {
            pastor_id: pastor.display_id(),
            id: pastor.id,
            full_name: pastor.full_name,
            gender: pastor.gender,
            pastor_rank: pastor.pastor_rank,
            national_id: pastor.national_id,
            date_of_birth: pastor.date_of_birth,
            phone_number: pastor.phone_number,
            start_of_service: pastor.start_of_service,
            status: pastor.status,
            created_at: pastor.created_at,
            updated_at: pastor.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorSummaryDto {
    pub pastor: PastorDto,
    pub age: i32,
    pub years_of_service: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorsByRankResponse {
    pub rank: String,
    pub count: u64,
    pub pastors: Vec<PastorDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorsByStatusResponse {
    pub status: String,
    pub count: u64,
    pub pastors: Vec<PastorDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorsByGenderResponse {
    pub gender: String,
    pub count: u64,
    pub pastors: Vec<PastorDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PastorCollectionResponse {
    pub count: u64,
    pub pastors: Vec<PastorDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkPastorsRequest {
    #[serde(default)]
    pub pastors: Option<Vec<PastorPayload>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankParam {
    pub rank: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusParam {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenderParam {
    pub gender: Option<String>,
}

pub async fn list(
    Extension(state): Extension<AppState>,
    Query(params): Query<PastorListParams>,
) -> ApiResult<Json<Vec<PastorDto>>> {
    let rows = state
        .pastors
        .list(params)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PastorPayload>,
) -> ApiResult<impl IntoResponse> {
    let pastor = state
        .pastors
        .create(payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok((StatusCode::CREATED, Json(PastorDto::from(pastor))))
}

pub async fn retrieve(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<PastorDto>> {
    let pastor = state
        .pastors
        .get(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(pastor.into()))
}

pub async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PastorPayload>,
) -> ApiResult<Json<PastorDto>> {
    let pastor = state
        .pastors
        .update(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(pastor.into()))
}

pub async fn partial_update(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PastorPayload>,
) -> ApiResult<Json<PastorDto>> {
    let pastor = state
        .pastors
        .patch(id, payload)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(pastor.into()))
}

pub async fn destroy(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .pastors
        .delete(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn statistics(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<PastorStatistics>> {
    let stats = state
        .pastors
        .statistics()
        .await
        .map_err(|e| state.problem(&e, "/api/pastors/statistics/"))?;
    Ok(Json(stats))
}

pub async fn summary(
    Extension(state): Extension<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<PastorSummaryDto>> {
    let summary = state
        .pastors
        .summary(id)
        .await
        .map_err(|e| state.problem(&e, COLLECTION))?;
    Ok(Json(PastorSummaryDto {
        pastor: summary.pastor.into(),
        age: summary.age,
        years_of_service: summary.years_of_service,
    }))
}

pub async fn by_rank(
    Extension(state): Extension<AppState>,
    Query(params): Query<RankParam>,
) -> ApiResult<Json<PastorsByRankResponse>> {
    const INSTANCE: &str = "/api/pastors/by_rank/";
    let rows = state
        .pastors
        .by_rank(params.rank.as_deref())
        .await
        .map_err(|e| state.problem(&e, INSTANCE))?;
    Ok(Json(PastorsByRankResponse {
        rank: params.rank.unwrap_or_default(),
        count: rows.len() as u64,
        pastors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn by_status(
    Extension(state): Extension<AppState>,
    Query(params): Query<StatusParam>,
) -> ApiResult<Json<PastorsByStatusResponse>> {
    const INSTANCE: &str = "/api/pastors/by_status/";
    let rows = state
        .pastors
        .by_status(params.status.as_deref())
        .await
        .map_err(|e| state.problem(&e, INSTANCE))?;
    Ok(Json(PastorsByStatusResponse {
        status: params.status.unwrap_or_default(),
        count: rows.len() as u64,
        pastors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn by_gender(
    Extension(state): Extension<AppState>,
    Query(params): Query<GenderParam>,
) -> ApiResult<Json<PastorsByGenderResponse>> {
    const INSTANCE: &str = "/api/pastors/by_gender/";
    let rows = state
        .pastors
        .by_gender(params.gender.as_deref())
        .await
        .map_err(|e| state.problem(&e, INSTANCE))?;
    Ok(Json(PastorsByGenderResponse {
        gender: params.gender.unwrap_or_default(),
        count: rows.len() as u64,
        pastors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn active(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<PastorCollectionResponse>> {
    let rows = state
        .pastors
        .active()
        .await
        .map_err(|e| state.problem(&e, "/api/pastors/active/"))?;
    Ok(Json(PastorCollectionResponse {
        count: rows.len() as u64,
        pastors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn retired(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<PastorCollectionResponse>> {
    let rows = state
        .pastors
        .retired()
        .await
        .map_err(|e| state.problem(&e, "/api/pastors/retired/"))?;
    Ok(Json(PastorCollectionResponse {
        count: rows.len() as u64,
        pastors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn bulk_create(
    Extension(state): Extension<AppState>,
    Json(body): Json<BulkPastorsRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state
        .pastors
        .bulk_create(body.pastors.unwrap_or_default())
        .await
        .map_err(|e| state.problem(&e, "/api/pastors/bulk_create/"))?;
    let dtos: Vec<PastorDto> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(dtos)))
}

//! OpenAPI document for the registry API.

use axum::Json;
use utoipa::OpenApi;

use crate::api::problem::{FieldViolation, Problem};
use crate::api::rest::church_pastors::{
    BulkChurchPastorsRequest, ChurchPastorDto, ChurchPastorSummaryDto,
};
use crate::api::rest::church_roles::{
    BulkChurchRolesRequest, ChurchRoleDto, ChurchRoleSummaryDto,
};
use crate::api::rest::churches::{BulkChurchesRequest, ChurchDto, ChurchSummaryDto};
use crate::api::rest::districts::{BulkDistrictsRequest, DistrictDto, DistrictSummaryDto};
use crate::api::rest::pastors::{
    BulkPastorsRequest, PastorCollectionResponse, PastorDto, PastorSummaryDto,
    PastorsByGenderResponse, PastorsByRankResponse, PastorsByStatusResponse,
};
use crate::api::rest::sections::{
    BulkSectionsRequest, SectionDto, SectionSummaryDto, SectionsByDistrictResponse,
};
use crate::domain::fields::{Gender, PastorRank, PastorStatus, RoleName};
use crate::domain::service::church_pastors::{
    ChurchPastorPayload, ChurchPastorStatistics, RoleAssignmentCount,
};
use crate::domain::service::church_roles::{ChurchRolePayload, ChurchRoleStatistics};
use crate::domain::service::churches::{ChurchPayload, ChurchStatistics};
use crate::domain::service::districts::{DistrictPayload, DistrictStatistics};
use crate::domain::service::pastors::{
    GenderCount, PastorPayload, PastorStatistics, RankCount, StatusCount,
};
use crate::domain::service::sections::{
    DistrictSectionCount, SectionPayload, SectionStatistics,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Church Registry API",
        description = "Administrative registry for districts, sections, churches, pastoral roles and pastors."
    ),
    components(schemas(
        Problem,
        FieldViolation,
        Gender,
        PastorRank,
        PastorStatus,
        RoleName,
        DistrictDto,
        DistrictPayload,
        DistrictStatistics,
        DistrictSummaryDto,
        BulkDistrictsRequest,
        SectionDto,
        SectionPayload,
        SectionStatistics,
        SectionSummaryDto,
        SectionsByDistrictResponse,
        DistrictSectionCount,
        BulkSectionsRequest,
        ChurchDto,
        ChurchPayload,
        ChurchStatistics,
        ChurchSummaryDto,
        BulkChurchesRequest,
        ChurchRoleDto,
        ChurchRolePayload,
        ChurchRoleStatistics,
        ChurchRoleSummaryDto,
        BulkChurchRolesRequest,
        PastorDto,
        PastorPayload,
        PastorStatistics,
        PastorSummaryDto,
        PastorsByRankResponse,
        PastorsByStatusResponse,
        PastorsByGenderResponse,
        PastorCollectionResponse,
        RankCount,
        StatusCount,
        GenderCount,
        BulkPastorsRequest,
        ChurchPastorDto,
        ChurchPastorPayload,
        ChurchPastorStatistics,
        ChurchPastorSummaryDto,
        RoleAssignmentCount,
        BulkChurchPastorsRequest,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

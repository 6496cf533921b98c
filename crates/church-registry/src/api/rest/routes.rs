//! Route table for the `/api` surface.
//!
//! Every resource exposes the same shape: collection CRUD, `statistics/`,
//! `bulk_create/`, by-id CRUD and `summary/`, plus the entity-specific
//! query actions on pastors and sections.

use axum::Router;
use axum::routing::{get, post};

use crate::api::rest::{church_pastors, church_roles, churches, districts, pastors, sections};

pub fn api_router() -> Router {
    Router::new()
        .route(
            "/districts/",
            get(districts::list).post(districts::create),
        )
        .route("/districts/statistics/", get(districts::statistics))
        .route("/districts/bulk_create/", post(districts::bulk_create))
        .route(
            "/districts/{id}/",
            get(districts::retrieve)
                .put(districts::update)
                .patch(districts::partial_update)
                .delete(districts::destroy),
        )
        .route("/districts/{id}/summary/", get(districts::summary))
        .route("/sections/", get(sections::list).post(sections::create))
        .route("/sections/statistics/", get(sections::statistics))
        .route("/sections/bulk_create/", post(sections::bulk_create))
        .route("/sections/by_district/", get(sections::by_district))
        .route(
            "/sections/{id}/",
            get(sections::retrieve)
                .put(sections::update)
                .patch(sections::partial_update)
                .delete(sections::destroy),
        )
        .route("/sections/{id}/summary/", get(sections::summary))
        .route("/churches/", get(churches::list).post(churches::create))
        .route("/churches/statistics/", get(churches::statistics))
        .route("/churches/bulk_create/", post(churches::bulk_create))
        .route(
            "/churches/{id}/",
            get(churches::retrieve)
                .put(churches::update)
                .patch(churches::partial_update)
                .delete(churches::destroy),
        )
        .route("/churches/{id}/summary/", get(churches::summary))
        .route(
            "/church-roles/",
            get(church_roles::list).post(church_roles::create),
        )
        .route("/church-roles/statistics/", get(church_roles::statistics))
        .route("/church-roles/bulk_create/", post(church_roles::bulk_create))
        .route(
            "/church-roles/{id}/",
            get(church_roles::retrieve)
                .put(church_roles::update)
                .patch(church_roles::partial_update)
                .delete(church_roles::destroy),
        )
        .route("/church-roles/{id}/summary/", get(church_roles::summary))
        .route(
            "/church-pastors/",
            get(church_pastors::list).post(church_pastors::create),
        )
        .route(
            "/church-pastors/statistics/",
            get(church_pastors::statistics),
        )
        .route(
            "/church-pastors/bulk_create/",
            post(church_pastors::bulk_create),
        )
        .route(
            "/church-pastors/{id}/",
            get(church_pastors::retrieve)
                .put(church_pastors::update)
                .patch(church_pastors::partial_update)
                .delete(church_pastors::destroy),
        )
        .route(
            "/church-pastors/{id}/summary/",
            get(church_pastors::summary),
        )
        .route("/pastors/", get(pastors::list).post(pastors::create))
        .route("/pastors/statistics/", get(pastors::statistics))
        .route("/pastors/bulk_create/", post(pastors::bulk_create))
        .route("/pastors/by_rank/", get(pastors::by_rank))
        .route("/pastors/by_status/", get(pastors::by_status))
        .route("/pastors/by_gender/", get(pastors::by_gender))
        .route("/pastors/active/", get(pastors::active))
        .route("/pastors/retired/", get(pastors::retired))
        .route(
            "/pastors/{id}/",
            get(pastors::retrieve)
                .put(pastors::update)
                .patch(pastors::partial_update)
                .delete(pastors::destroy),
        )
        .route("/pastors/{id}/summary/", get(pastors::summary))
}

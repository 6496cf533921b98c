#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end API tests against an in-memory SQLite database.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use church_registry::api::auth::AuthState;
use church_registry::api::state::AppState;
use church_registry::bootstrap::server::build_router;
use church_registry::infra::storage::db;

async fn test_app() -> Router {
    let conn = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&conn).await.unwrap();
    let state = AppState::from_db(conn, false);
    build_router(state, AuthState::disabled(), false)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn pastor_payload(name: &str, gender: &str, status: &str, phone: &str) -> Value {
    json!({
        "full_name": name,
        "gender": gender,
        "pastor_rank": "Bishop",
        "national_id": "12345678",
        "date_of_birth": "1970-01-01",
        "phone_number": phone,
        "start_of_service": "2000-01-01",
        "status": status,
    })
}

#[tokio::test]
async fn district_crud_round_trip() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/districts/",
        Some(json!({"name": "Central"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Central");
    assert_eq!(created["district_id"], "DIS001");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/districts/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Central");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/districts/{id}/"),
        Some(json!({"name": "Central Valley"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Central Valley");

    let (status, _) = send(&app, "DELETE", &format!("/api/districts/{id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/districts/{id}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_district_name_conflicts_and_count_is_unchanged() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/districts/",
        Some(json!({"name": "Central"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, problem) = send(
        &app,
        "POST",
        "/api/districts/",
        Some(json!({"name": "Central"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(problem["status"], 409);
    // constraint detail is hidden outside development configuration
    assert!(!problem["detail"].as_str().unwrap().contains("UNIQUE"));

    let (_, list) = send(&app, "GET", "/api/districts/", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_district_reports_missing_name_per_field() {
    let app = test_app().await;

    let (status, problem) = send(&app, "POST", "/api/districts/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"][0]["field"], "name");
    assert_eq!(problem["errors"][0]["message"], "This field is required.");
}

#[tokio::test]
async fn pastors_filtering_intersects_and_search_matches() {
    let app = test_app().await;

    for (name, gender, status, phone) in [
        ("John Doe", "Male", "active", "+254712345678"),
        ("Jane Smith", "Female", "active", "+254787654321"),
        ("Bob Johnson", "Male", "retired", "+254711223344"),
    ] {
        let (code, _) = send(
            &app,
            "POST",
            "/api/pastors/",
            Some(pastor_payload(name, gender, status, phone)),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, rows) = send(&app, "GET", "/api/pastors/?status=active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 2);
    for row in rows.as_array().unwrap() {
        assert_eq!(row["status"], "active");
    }

    let (_, rows) = send(&app, "GET", "/api/pastors/?status=active&gender=Male", None).await;
    let rows = rows.as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["full_name"], "John Doe");

    let (_, rows) = send(&app, "GET", "/api/pastors/?search=john", None).await;
    // substring match is case-insensitive: John Doe and Bob Johnson
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (_, rows) = send(&app, "GET", "/api/pastors/?ordering=-full_name", None).await;
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith", "Bob Johnson"]);

    let (status, problem) = send(&app, "GET", "/api/pastors/?ordering=phone_number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"][0]["field"], "ordering");
}

#[tokio::test]
async fn pastor_statistics_match_the_list_snapshot() {
    let app = test_app().await;

    for (name, gender, status, phone) in [
        ("John Doe", "Male", "active", "+254712345678"),
        ("Jane Smith", "Female", "retired", "+254787654321"),
        ("Bob Johnson", "Male", "active", "+254711223344"),
    ] {
        send(
            &app,
            "POST",
            "/api/pastors/",
            Some(pastor_payload(name, gender, status, phone)),
        )
        .await;
    }

    let (_, list) = send(&app, "GET", "/api/pastors/", None).await;
    let (status, stats) = send(&app, "GET", "/api/pastors/statistics/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats["total_pastors"].as_u64().unwrap(),
        list.as_array().unwrap().len() as u64
    );
    assert_eq!(stats["recent_pastors"], stats["total_pastors"]);
    assert_eq!(stats["active_pastors"], 2);
    assert_eq!(stats["retired_pastors"], 1);
    assert_eq!(stats["pastors_by_gender"][0]["gender"], "Male");
    assert_eq!(stats["pastors_by_gender"][0]["count"], 2);
}

#[tokio::test]
async fn pastor_summary_computes_age_and_service_years() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/pastors/",
        Some(pastor_payload("John Doe", "Male", "active", "+254712345678")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, summary) = send(&app, "GET", &format!("/api/pastors/{id}/summary/"), None).await;
    assert_eq!(status, StatusCode::OK);

    // whole-year arithmetic against today's clock
    let today = chrono::Utc::now().date_naive();
    let dob = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let start = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let expected_age = church_registry::domain::model::completed_years(dob, today);
    let expected_service = church_registry::domain::model::completed_years(start, today);
    assert_eq!(summary["age"].as_i64().unwrap(), i64::from(expected_age));
    assert_eq!(
        summary["years_of_service"].as_i64().unwrap(),
        i64::from(expected_service)
    );
    assert_eq!(summary["pastor"]["pastor_id"], "PAS001");
}

#[tokio::test]
async fn pastors_bulk_create_is_all_or_nothing() {
    let app = test_app().await;

    let mut malformed = pastor_payload("Jane Smith", "Female", "active", "+254787654321");
    malformed.as_object_mut().unwrap().remove("date_of_birth");

    let (status, problem) = send(
        &app,
        "POST",
        "/api/pastors/bulk_create/",
        Some(json!({
            "pastors": [
                pastor_payload("John Doe", "Male", "active", "+254712345678"),
                malformed,
                pastor_payload("Bob Johnson", "Male", "active", "+254711223344"),
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"][0]["field"], "pastors[1].date_of_birth");

    let (_, list) = send(&app, "GET", "/api/pastors/", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (status, created) = send(
        &app,
        "POST",
        "/api/pastors/bulk_create/",
        Some(json!({
            "pastors": [
                pastor_payload("John Doe", "Male", "active", "+254712345678"),
                pastor_payload("Jane Smith", "Female", "retired", "+254787654321"),
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bulk_create_rejects_oversized_and_empty_batches() {
    let app = test_app().await;

    let names: Vec<Value> = (0..11).map(|i| json!({"name": format!("District {i}")})).collect();
    let (status, problem) = send(
        &app,
        "POST",
        "/api/districts/bulk_create/",
        Some(json!({"districts": names})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = problem["detail"].as_str().unwrap();
    assert!(detail.contains("10"));
    assert!(detail.contains("11"));

    let (status, problem) = send(
        &app,
        "POST",
        "/api/districts/bulk_create/",
        Some(json!({"districts": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        problem["detail"]
            .as_str()
            .unwrap()
            .contains("non-empty list")
    );

    let (_, list) = send(&app, "GET", "/api/districts/", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

async fn seed_hierarchy(app: &Router) -> (i64, i64, i64, i64, i64) {
    let (_, district) = send(app, "POST", "/api/districts/", Some(json!({"name": "Central"}))).await;
    let district_id = district["id"].as_i64().unwrap();

    let (_, section) = send(
        app,
        "POST",
        "/api/sections/",
        Some(json!({"district": district_id, "name": "North Section"})),
    )
    .await;
    let section_id = section["id"].as_i64().unwrap();

    let (_, church) = send(
        app,
        "POST",
        "/api/churches/",
        Some(json!({
            "section": section_id,
            "church_name": "Grace Chapel",
            "location": "Riverside"
        })),
    )
    .await;
    let church_id = church["id"].as_i64().unwrap();

    let (_, role) = send(
        app,
        "POST",
        "/api/church-roles/",
        Some(json!({"role_name": "Senior Pastor"})),
    )
    .await;
    let role_id = role["id"].as_i64().unwrap();

    let (_, pastor) = send(
        app,
        "POST",
        "/api/pastors/",
        Some(pastor_payload("John Doe", "Male", "active", "+254712345678")),
    )
    .await;
    let pastor_id = pastor["id"].as_i64().unwrap();

    let (status, _) = send(
        app,
        "POST",
        "/api/church-pastors/",
        Some(json!({"church": church_id, "pastor": pastor_id, "role": role_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (district_id, section_id, church_id, role_id, pastor_id)
}

#[tokio::test]
async fn deleting_a_district_cascades_through_the_tree() {
    let app = test_app().await;
    let (district_id, _, _, _, pastor_id) = seed_hierarchy(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/districts/{district_id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, sections) = send(&app, "GET", "/api/sections/", None).await;
    assert_eq!(sections.as_array().unwrap().len(), 0);
    let (_, churches) = send(&app, "GET", "/api/churches/", None).await;
    assert_eq!(churches.as_array().unwrap().len(), 0);
    let (_, assignments) = send(&app, "GET", "/api/church-pastors/", None).await;
    assert_eq!(assignments.as_array().unwrap().len(), 0);

    // pastors are standalone records and survive the cascade
    let (status, _) = send(&app, "GET", &format!("/api/pastors/{pastor_id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn assignment_triple_is_unique() {
    let app = test_app().await;
    let (_, _, church_id, role_id, pastor_id) = seed_hierarchy(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/church-pastors/",
        Some(json!({"church": church_id, "pastor": pastor_id, "role": role_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn assignment_rejects_dangling_references() {
    let app = test_app().await;

    let (status, problem) = send(
        &app,
        "POST",
        "/api/church-pastors/",
        Some(json!({"church": 7, "pastor": 8, "role": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = problem["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["church", "pastor", "role"]);
}

#[tokio::test]
async fn section_summary_inlines_the_parent_district() {
    let app = test_app().await;
    let (district_id, section_id, ..) = seed_hierarchy(&app).await;

    let (status, summary) = send(
        &app,
        "GET",
        &format!("/api/sections/{section_id}/summary/"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["section"]["district_name"], "Central");
    assert_eq!(summary["district"]["id"].as_i64().unwrap(), district_id);
    assert_eq!(summary["district"]["name"], "Central");
}

#[tokio::test]
async fn district_summary_counts_children() {
    let app = test_app().await;
    let (district_id, ..) = seed_hierarchy(&app).await;

    let (status, summary) = send(
        &app,
        "GET",
        &format!("/api/districts/{district_id}/summary/"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["sections_count"], 1);
    assert_eq!(summary["churches_count"], 1);
}

#[tokio::test]
async fn church_summary_lists_assignments() {
    let app = test_app().await;
    let (_, _, church_id, ..) = seed_hierarchy(&app).await;

    let (status, summary) = send(
        &app,
        "GET",
        &format!("/api/churches/{church_id}/summary/"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["pastors_count"], 1);
    assert_eq!(summary["assignments"][0]["pastor_name"], "John Doe");
    assert_eq!(summary["assignments"][0]["role_name"], "Senior Pastor");
}

#[tokio::test]
async fn pastors_by_rank_requires_and_echoes_the_parameter() {
    let app = test_app().await;
    seed_hierarchy(&app).await;

    let (status, problem) = send(&app, "GET", "/api/pastors/by_rank/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["detail"], "rank query parameter is required");

    let (status, body) = send(&app, "GET", "/api/pastors/by_rank/?rank=Bishop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rank"], "Bishop");
    assert_eq!(body["count"], 1);
    assert_eq!(body["pastors"][0]["pastor_rank"], "Bishop");
}

#[tokio::test]
async fn active_and_retired_shortcuts_filter_by_status() {
    let app = test_app().await;
    for (name, gender, status, phone) in [
        ("John Doe", "Male", "active", "+254712345678"),
        ("Jane Smith", "Female", "retired", "+254787654321"),
    ] {
        send(
            &app,
            "POST",
            "/api/pastors/",
            Some(pastor_payload(name, gender, status, phone)),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/api/pastors/active/", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["pastors"][0]["full_name"], "John Doe");

    let (_, body) = send(&app, "GET", "/api/pastors/retired/", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["pastors"][0]["full_name"], "Jane Smith");
}

#[tokio::test]
async fn sections_by_district_requires_a_numeric_parameter() {
    let app = test_app().await;
    let (district_id, ..) = seed_hierarchy(&app).await;

    let (status, problem) = send(&app, "GET", "/api/sections/by_district/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["detail"], "district_id query parameter is required");

    let (status, _) = send(&app, "GET", "/api/sections/by_district/?district_id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/sections/by_district/?district_id={district_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["sections"][0]["name"], "North Section");
}

#[tokio::test]
async fn invalid_enum_payload_lists_every_offending_field() {
    let app = test_app().await;

    let (status, problem) = send(
        &app,
        "POST",
        "/api/pastors/",
        Some(json!({
            "full_name": "John Doe",
            "gender": "Other",
            "pastor_rank": "Deacon",
            "date_of_birth": "1970-13-01",
            "phone_number": "0712345678",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = problem["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"gender"));
    assert!(fields.contains(&"pastor_rank"));
    assert!(fields.contains(&"date_of_birth"));
    assert!(fields.contains(&"phone_number"));
}

#[tokio::test]
async fn put_replaces_the_whole_record() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/pastors/",
        Some(pastor_payload("John Doe", "Male", "active", "+254712345678")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/pastors/{id}/"),
        Some(pastor_payload("John M. Doe", "Male", "retired", "+254712345678")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["full_name"], "John M. Doe");
    assert_eq!(updated["status"], "retired");

    // PUT with a missing required field is a validation error
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/pastors/{id}/"),
        Some(json!({"full_name": "No Phone"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn district_statistics_name_the_extremes() {
    let app = test_app().await;
    for name in ["Central", "Coast", "Highlands"] {
        send(&app, "POST", "/api/districts/", Some(json!({"name": name}))).await;
    }

    let (status, stats) = send(&app, "GET", "/api/districts/statistics/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_districts"], 3);
    assert!(stats["oldest_district"].is_string());
    assert!(stats["newest_district"].is_string());
}

#[tokio::test]
async fn api_requires_bearer_token_when_configured() {
    let conn = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&conn).await.unwrap();
    let state = AppState::from_db(conn, false);
    let app = build_router(
        state,
        AuthState::new(Some("sekrit".to_owned())),
        false,
    );

    // liveness probe stays open
    let (status, _) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, problem) = send(&app, "GET", "/api/districts/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        problem["detail"],
        "Authentication credentials were not provided."
    );

    let request = Request::builder()
        .method("GET")
        .uri("/api/districts/")
        .header(header::AUTHORIZATION, "Bearer sekrit")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn conflict_detail_is_exposed_in_development_configuration() {
    let conn = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&conn).await.unwrap();
    let state = AppState::from_db(conn, true);
    let app = build_router(state, AuthState::disabled(), false);

    send(&app, "POST", "/api/districts/", Some(json!({"name": "Central"}))).await;
    let (status, problem) = send(
        &app,
        "POST",
        "/api/districts/",
        Some(json!({"name": "Central"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(problem["detail"].as_str().unwrap().contains(':'));
}

#[tokio::test]
async fn openapi_document_is_served_when_docs_are_enabled() {
    let conn = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&conn).await.unwrap();
    let state = AppState::from_db(conn, false);
    let app = build_router(state, AuthState::disabled(), true);

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Church Registry API");
    assert!(doc["components"]["schemas"]["PastorDto"].is_object());
}

//! Router assembly and the serve loop.

use anyhow::Context;
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower_http::trace::TraceLayer;

use crate::api::auth::{self, AuthState};
use crate::api::openapi;
use crate::api::rest::routes;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::infra::storage::db;

/// Builds the full application router: authenticated `/api` surface,
/// liveness probe and (optionally) the OpenAPI document.
pub fn build_router(state: AppState, auth_state: AuthState, enable_docs: bool) -> Router {
    let api = routes::api_router()
        .layer(Extension(state))
        .layer(middleware::from_fn_with_state(
            auth_state,
            auth::require_bearer,
        ));

    let mut router = Router::new().route("/healthz", get(healthz)).nest("/api", api);
    if enable_docs {
        router = router.route("/api-docs/openapi.json", get(openapi::openapi_json));
    }
    router.layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// Connects, migrates and serves until shutdown.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let conn = db::connect(&config.database.dsn).await?;
    db::migrate(&conn).await?;

    let state = AppState::from_db(conn, config.server.expose_internal_errors);
    let auth_state = AuthState::new(config.auth.api_token.clone());
    let router = build_router(state, auth_state, config.server.enable_docs);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "registry server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

//! Uniform bearer-token authentication for the `/api` surface.
//!
//! When no token is configured the middleware passes every request through
//! (development mode). When a token is configured, every request must carry
//! `Authorization: Bearer <token>`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header;

use crate::api::problem::Problem;

#[derive(Clone, Default)]
pub struct AuthState {
    token: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { token: None }
    }
}

pub async fn require_bearer(
    State(auth): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth.token.as_deref() else {
        return next.run(request).await;
    };

    let instance = request.uri().path().to_owned();
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => next.run(request).await,
        Some(_) => Problem::unauthorized("Invalid token.")
            .with_instance(instance)
            .into_response(),
        None => Problem::unauthorized("Authentication credentials were not provided.")
            .with_instance(instance)
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::routing::get;
    use http::{Request, StatusCode};
    use tower::ServiceExt as _;

    use super::*;

    fn app(auth: AuthState) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(auth, require_bearer))
    }

    #[tokio::test]
    async fn passes_through_when_disabled() {
        let response = app(AuthState::disabled())
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_missing_and_wrong_tokens() {
        let auth = AuthState::new(Some("sekrit".to_owned()));

        let response = app(auth.clone())
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app(auth)
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header("authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn accepts_the_configured_token() {
        let auth = AuthState::new(Some("sekrit".to_owned()));
        let response = app(auth)
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header("authorization", "Bearer sekrit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! RFC 9457 Problem Details for HTTP APIs.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// RFC 9457 problem document returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(title = "Problem")]
#[must_use]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// A human-readable explanation specific to this occurrence.
    pub detail: String,
    /// A URI reference identifying this occurrence of the problem.
    pub instance: String,
    /// Field-level validation errors for 4xx problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

/// Individual validation violation for a specific field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(title = "FieldViolation")]
pub struct FieldViolation {
    /// Field path, e.g. `phone_number` or `pastors[1].date_of_birth`.
    pub field: String,
    /// Human-readable message describing the validation error.
    pub message: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            errors: None,
        }
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldViolation>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_status_as_number_and_skips_empty_errors() {
        let problem = Problem::new(StatusCode::NOT_FOUND, "Not Found", "pastor not found")
            .with_instance("/api/pastors/42/");
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["instance"], "/api/pastors/42/");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn round_trips_through_serde() {
        let problem = Problem::new(StatusCode::BAD_REQUEST, "Validation failed", "bad input")
            .with_errors(vec![FieldViolation {
                field: "name".to_owned(),
                message: "This field is required.".to_owned(),
            }]);
        let json = serde_json::to_string(&problem).unwrap();
        let back: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, StatusCode::BAD_REQUEST);
        assert_eq!(back.errors.unwrap()[0].field, "name");
    }
}

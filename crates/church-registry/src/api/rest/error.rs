//! Maps domain errors onto RFC 9457 problem documents.

use http::StatusCode;

use crate::api::problem::{FieldViolation, Problem};
use crate::domain::error::DomainError;

/// Converts a [`DomainError`] into the problem returned to the client.
///
/// Storage detail for constraint violations is only exposed when the server
/// runs with `expose_internal_errors` (development configuration).
pub fn domain_error_to_problem(
    error: &DomainError,
    instance: &str,
    expose_internal: bool,
) -> Problem {
    match error {
        DomainError::NotFound(entity) => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("{entity} not found"),
        )
        .with_instance(instance),
        DomainError::Validation(violations) => Problem::new(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "One or more fields failed validation",
        )
        .with_instance(instance)
        .with_errors(
            violations
                .iter()
                .map(|violation| FieldViolation {
                    field: violation.field.clone(),
                    message: violation.message.clone(),
                })
                .collect(),
        ),
        DomainError::Conflict { entity, detail } => {
            let detail = if expose_internal {
                format!("Duplicate {entity} or database constraint violation: {detail}")
            } else {
                format!("Duplicate {entity} or database constraint violation")
            };
            Problem::new(StatusCode::CONFLICT, "Conflict", detail).with_instance(instance)
        }
        DomainError::BadRequest(message) => {
            Problem::new(StatusCode::BAD_REQUEST, "Bad Request", message.clone())
                .with_instance(instance)
        }
        DomainError::Database(db_err) => {
            tracing::error!(error = %db_err, "database error while handling request");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal database error occurred",
            )
            .with_instance(instance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Violation;

    #[test]
    fn validation_errors_carry_field_messages() {
        let error = DomainError::Validation(vec![Violation::new(
            "phone_number",
            "Phone number must be in format: '+254712345678'",
        )]);
        let problem = domain_error_to_problem(&error, "/api/pastors/", false);
        assert_eq!(problem.status, StatusCode::BAD_REQUEST);
        let errors = problem.errors.unwrap();
        assert_eq!(errors[0].field, "phone_number");
    }

    #[test]
    fn conflict_detail_is_gated_by_configuration() {
        let error = DomainError::Conflict {
            entity: "district",
            detail: "UNIQUE constraint failed: districts.name".to_owned(),
        };
        let hidden = domain_error_to_problem(&error, "/api/districts/", false);
        assert_eq!(hidden.status, StatusCode::CONFLICT);
        assert!(!hidden.detail.contains("UNIQUE constraint"));

        let exposed = domain_error_to_problem(&error, "/api/districts/", true);
        assert!(exposed.detail.contains("UNIQUE constraint"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let problem = domain_error_to_problem(&DomainError::NotFound("pastor"), "/x", false);
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.detail, "pastor not found");
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;

/// API error rendered as `{"error": <message>}` with the chosen status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_not_found() {
            Self::not_found(e.to_string())
        } else {
            Self::bad_request(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_not_found_maps_to_404() {
        let e = ApiError::from(ServiceError::StudentNotFound);
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Student not found");
    }

    #[test]
    fn rule_conflicts_map_to_400() {
        for err in [
            ServiceError::DuplicateEmail,
            ServiceError::DuplicateTitle,
            ServiceError::CourseFull,
            ServiceError::StudentEnrolled,
            ServiceError::CourseHasEnrollments,
            ServiceError::EnrollmentNotFound,
        ] {
            assert_eq!(ApiError::from(err).status, StatusCode::BAD_REQUEST);
        }
    }
}

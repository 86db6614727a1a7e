use thiserror::Error;

/// Business-rule violations reported by the registry.
///
/// Display strings are the API's fixed error message set; controllers render
/// them verbatim into `{"error": ...}` bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Student not found")]
    StudentNotFound,
    #[error("Course not found")]
    CourseNotFound,
    #[error("Email must be unique")]
    DuplicateEmail,
    #[error("Course title must be unique")]
    DuplicateTitle,
    #[error("Course is full")]
    CourseFull,
    #[error("Enrollment not found")]
    EnrollmentNotFound,
    #[error("Cannot delete student: enrolled in a course")]
    StudentEnrolled,
    #[error("Cannot delete course: students are enrolled")]
    CourseHasEnrollments,
}

impl ServiceError {
    /// Whether the error names a missing entity rather than a rule conflict.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound | Self::CourseNotFound)
    }
}

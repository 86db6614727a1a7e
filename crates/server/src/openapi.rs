use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthDoc {
    pub status: String,
}

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: u32,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct CourseDoc {
    pub id: u32,
    pub title: String,
    pub teacher: String,
    pub capacity: u32,
}

#[derive(ToSchema)]
pub struct EnrollmentDoc {
    pub student_id: u32,
    pub course_id: u32,
}

#[derive(ToSchema)]
pub struct CreateStudentDoc {
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct UpdateStudentDoc {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateCourseDoc {
    pub title: String,
    pub teacher: String,
}

#[derive(ToSchema)]
pub struct UpdateCourseDoc {
    pub title: Option<String>,
    pub teacher: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::create_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        crate::routes::courses::create_course,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
        crate::routes::courses::enroll_student,
        crate::routes::courses::unenroll_student,
    ),
    components(
        schemas(
            HealthDoc,
            StudentDoc,
            CourseDoc,
            EnrollmentDoc,
            CreateStudentDoc,
            UpdateStudentDoc,
            CreateCourseDoc,
            UpdateCourseDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students", description = "Student management"),
        (name = "courses", description = "Course management and enrollments"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/students",
            "/students/{id}",
            "/courses",
            "/courses/{id}",
            "/courses/{id}/students/{student_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

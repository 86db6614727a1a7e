use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::{Course, Enrollment};
use service::pagination::Pagination;
use service::{CoursePatch, NewCourse};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListCoursesQuery {
    /// Case-sensitive substring filter on the title
    pub title: Option<String>,
    /// Case-sensitive substring filter on the teacher
    pub teacher: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    /// Post-filter, pre-pagination count
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCourseInput {
    pub title: Option<String>,
    pub teacher: Option<String>,
}

#[utoipa::path(
    get, path = "/courses", tag = "courses",
    params(ListCoursesQuery),
    responses((status = 200, description = "Filtered, paginated courses"))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(q): Query<ListCoursesQuery>,
) -> Json<CourseListResponse> {
    let mut courses = state.registry.list_courses().await;
    if let Some(title) = &q.title {
        courses.retain(|c| c.title.contains(title.as_str()));
    }
    if let Some(teacher) = &q.teacher {
        courses.retain(|c| c.teacher.contains(teacher.as_str()));
    }
    let total = courses.len();
    let page = Pagination {
        page: q.page.unwrap_or(1),
        limit: q.limit.unwrap_or(10),
    };
    Json(CourseListResponse { courses: page.slice(&courses), total })
}

#[utoipa::path(
    get, path = "/courses/{id}", tag = "courses",
    params(("id" = u32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Course>, ApiError> {
    state
        .registry
        .get_course(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Course not found"))
}

#[utoipa::path(
    post, path = "/courses", tag = "courses",
    request_body = crate::openapi::CreateCourseDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing fields or duplicate title")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourseInput>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    let (Some(title), Some(teacher)) = (input.title, input.teacher) else {
        return Err(ApiError::bad_request("title and teacher required"));
    };
    let course = state.registry.create_course(NewCourse { title, teacher }).await?;
    info!(id = course.id, "created course");
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put, path = "/courses/{id}", tag = "courses",
    params(("id" = u32, Path, description = "Course ID")),
    request_body = crate::openapi::UpdateCourseDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Duplicate title"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<UpdateCourseInput>,
) -> Result<Json<Course>, ApiError> {
    let patch = CoursePatch { title: input.title, teacher: input.teacher };
    let course = state.registry.update_course(id, patch).await?;
    info!(id, "updated course");
    Ok(Json(course))
}

#[utoipa::path(
    delete, path = "/courses/{id}", tag = "courses",
    params(("id" = u32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Students still enrolled"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.registry.remove_course(id).await?;
    info!(id, "deleted course");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/courses/{id}/students/{student_id}", tag = "courses",
    params(
        ("id" = u32, Path, description = "Course ID"),
        ("student_id" = u32, Path, description = "Student ID")
    ),
    responses(
        (status = 201, description = "Enrolled"),
        (status = 400, description = "Course is full"),
        (status = 404, description = "Unknown student or course")
    )
)]
pub async fn enroll_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(u32, u32)>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let enrollment = state.registry.enroll(student_id, id).await?;
    info!(course_id = id, student_id, "enrolled student");
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    delete, path = "/courses/{id}/students/{student_id}", tag = "courses",
    params(
        ("id" = u32, Path, description = "Course ID"),
        ("student_id" = u32, Path, description = "Student ID")
    ),
    responses((status = 204, description = "Unenrolled, or no enrollment existed"))
)]
pub async fn unenroll_student(
    State(state): State<AppState>,
    Path((id, student_id)): Path<(u32, u32)>,
) -> StatusCode {
    // Removing a missing enrollment is a no-op at the HTTP surface.
    if state.registry.unenroll(student_id, id).await.is_ok() {
        info!(course_id = id, student_id, "unenrolled student");
    }
    StatusCode::NO_CONTENT
}

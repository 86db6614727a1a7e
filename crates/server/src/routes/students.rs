use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::{Course, Student};
use service::pagination::Pagination;
use service::{NewStudent, StudentPatch};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListStudentsQuery {
    /// Case-sensitive substring filter on the name
    pub name: Option<String>,
    /// Case-sensitive substring filter on the email
    pub email: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
    /// Post-filter, pre-pagination count
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    pub student: Student,
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateStudentInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    params(ListStudentsQuery),
    responses((status = 200, description = "Filtered, paginated students"))
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(q): Query<ListStudentsQuery>,
) -> Json<StudentListResponse> {
    let mut students = state.registry.list_students().await;
    if let Some(name) = &q.name {
        students.retain(|s| s.name.contains(name.as_str()));
    }
    if let Some(email) = &q.email {
        students.retain(|s| s.email.contains(email.as_str()));
    }
    let total = students.len();
    let page = Pagination {
        page: q.page.unwrap_or(1),
        limit: q.limit.unwrap_or(10),
    };
    Json(StudentListResponse { students: page.slice(&students), total })
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = u32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with enrolled courses"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<StudentDetailResponse>, ApiError> {
    let student = state
        .registry
        .get_student(id)
        .await
        .ok_or_else(|| ApiError::not_found("Student not found"))?;
    let courses = state.registry.student_courses(id).await;
    Ok(Json(StudentDetailResponse { student, courses }))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::CreateStudentDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing fields or duplicate email")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudentInput>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let (Some(name), Some(email)) = (input.name, input.email) else {
        return Err(ApiError::bad_request("name and email required"));
    };
    let student = state.registry.create_student(NewStudent { name, email }).await?;
    info!(id = student.id, "created student");
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = u32, Path, description = "Student ID")),
    request_body = crate::openapi::UpdateStudentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Duplicate email"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<UpdateStudentInput>,
) -> Result<Json<Student>, ApiError> {
    let patch = StudentPatch { name: input.name, email: input.email };
    let student = state.registry.update_student(id, patch).await?;
    info!(id, "updated student");
    Ok(Json(student))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = u32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Student still enrolled"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.registry.remove_student(id).await?;
    info!(id, "deleted student");
    Ok(StatusCode::NO_CONTENT)
}

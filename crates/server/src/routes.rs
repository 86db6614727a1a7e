use axum::{
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::Registry;

pub mod courses;
pub mod students;

/// Shared state handed to every controller.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: API routes, Swagger UI, CORS and
/// request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/courses/:id/students/:student_id",
            post(courses::enroll_student).delete(courses::unenroll_student),
        )
        .merge(
            SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(
                            DefaultMakeSpan::new().level(Level::INFO).include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new().level(Level::INFO).include_headers(false),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}

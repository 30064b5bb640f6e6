use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::api::requests::{GenerateScheduleRequest, ScheduleWindow};
use crate::api::responses::{ErrorResponse, GenerateScheduleResponse};
use crate::api::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scheduling Service API",
        version = "1.0.0",
        description = "Nurse shift schedule generation API"
    ),
    paths(
        crate::api::handlers::schedule_handlers::generate_schedule,
        crate::api::handlers::schedule_handlers::healthz,
    ),
    components(schemas(
        GenerateScheduleRequest,
        ScheduleWindow,
        GenerateScheduleResponse,
        ErrorResponse,
    ))
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate-schedule", post(handlers::generate_schedule))
        .route("/healthz", get(handlers::healthz))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use shared::DomainError;

use crate::api::requests::GenerateScheduleRequest;
use crate::api::responses::{self, ErrorResponse, GenerateScheduleResponse};
use crate::api::state::AppState;
use crate::domain::hard_request_store::HardRequestInput;
use crate::domain::pipeline::{self, GenerateScheduleInput};
use crate::infrastructure::hard_request_store::fetch_or_degrade;

/// Generate a nurse shift schedule for a window
#[utoipa::path(
    post,
    path = "/generate-schedule",
    request_body = GenerateScheduleRequest,
    responses(
        (status = 200, description = "Schedule generated", body = GenerateScheduleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "No feasible schedule, solver timeout, or internal error", body = ErrorResponse)
    ),
    tag = "schedules"
)]
pub async fn generate_schedule(
    State(state): State<AppState>,
    Json(request): Json<GenerateScheduleRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let non_government_ids: Vec<String> = request
        .nurses
        .iter()
        .filter(|n| !n.is_government_official)
        .map(|n| n.id.clone())
        .collect();

    let hard_request_records = fetch_or_degrade(
        state.hard_request_store.as_ref(),
        &non_government_ids,
        request.schedule.start_date,
        request.schedule.end_date,
    )
    .await;
    let hard_requests = HardRequestInput::from_pairs(
        hard_request_records
            .into_iter()
            .map(|r| (r.nurse_id, r.date)),
    );

    let defaults = &state.settings.scheduling_defaults;
    let input = GenerateScheduleInput {
        nurses: request.nurses,
        start_date: request.schedule.start_date,
        end_date: request.schedule.end_date,
        previous_month_schedule: request.previous_month_schedule,
        monthly_soft_requests: request.monthly_soft_requests,
        carry_over_flags: request.carry_over_flags,
        holidays: request.holidays,
        required_nurses_morning: request
            .required_nurses_morning
            .unwrap_or(defaults.required_nurses_morning),
        required_nurses_afternoon: request
            .required_nurses_afternoon
            .unwrap_or(defaults.required_nurses_afternoon),
        required_nurses_night: request
            .required_nurses_night
            .unwrap_or(defaults.required_nurses_night),
        max_consecutive_shifts_worked: request
            .max_consecutive_shifts_worked
            .unwrap_or(defaults.max_consecutive_shifts_worked),
        target_off_days: request.target_off_days.unwrap_or(defaults.target_off_days),
        solver_time_limit: request
            .solver_time_limit
            .unwrap_or(defaults.solver_time_limit_seconds),
        hard_requests,
    };

    let output = tokio::task::spawn_blocking(move || pipeline::run(input))
        .await
        .map_err(|e| map_domain_error(&DomainError::InternalError(e.to_string())))?
        .map_err(|e| map_domain_error(&e))?;

    Ok((StatusCode::OK, Json(responses::assemble(&output))))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is healthy")),
    tag = "health"
)]
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn map_domain_error(error: &DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Infeasible(_)
        | DomainError::Timeout(_)
        | DomainError::ModelInvalid(_)
        | DomainError::ExternalServiceError(_)
        | DomainError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(error = %error, "generate-schedule request failed");

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

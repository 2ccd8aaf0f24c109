//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    error::AppError,
    state::{AppState, DurationInput},
};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map an [`AppError`] to a status code and an error body carrying the current timer.
fn error_response(state: &AppState, err: AppError) -> (StatusCode, Json<ApiResponse>) {
    let status = if err.is_invalid_argument() {
        StatusCode::BAD_REQUEST
    } else {
        error!("Timer operation failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    match state.snapshot() {
        Ok(snapshot) => (status, Json(ApiResponse::error(err.to_string(), snapshot))),
        Err(_) => {
            // Without a snapshot there is nothing useful to put in the body
            let fallback = ApiResponse::error(err.to_string(), Default::default());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(fallback))
        }
    }
}

/// Handle POST /pause - Pause the timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.pause() {
        Ok((changed, snapshot)) => {
            let message = if changed { "Timer paused" } else { "Timer already paused" };
            info!("Pause endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message.to_string(), snapshot)))
        }
        Err(e) => Err(error_response(&state, e)),
    }
}

/// Handle POST /resume - Resume the timer
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.resume() {
        Ok((changed, snapshot)) => {
            let message = if changed { "Timer resumed" } else { "Timer already running" };
            info!("Resume endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message.to_string(), snapshot)))
        }
        Err(e) => Err(error_response(&state, e)),
    }
}

/// Handle POST /reset - Back to the first topic
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.reset() {
        Ok(snapshot) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::for_timer("Timer reset".to_string(), snapshot)))
        }
        Err(e) => Err(error_response(&state, e)),
    }
}

/// Handle PUT /duration - Change the per-topic duration
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> HandlerResult {
    let input = DurationInput::from(request.seconds);
    match state.set_duration(&input) {
        Ok(snapshot) => {
            let message = format!("Duration per topic set to {}s", snapshot.interval_duration);
            Ok(Json(ApiResponse::for_timer(message, snapshot)))
        }
        Err(e) => Err(error_response(&state, e)),
    }
}

/// Handle GET /status - Return the timer snapshot and server info
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        topics: state.topics(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

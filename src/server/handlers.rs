//! Route handlers for the submission endpoints and the health check.

use super::AppState;
use crate::error::{SubmissionError, UNEXPECTED_ERROR_MESSAGE};
use crate::models::{ContactSubmission, DemoRequestSubmission, SubmissionResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

type SubmissionReply = (StatusCode, Json<SubmissionResponse>);

/// HTTP status for a handler outcome. The body always carries the details.
fn status_for(result: &Result<(), SubmissionError>) -> StatusCode {
    match result {
        Ok(()) => StatusCode::OK,
        Err(SubmissionError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SubmissionError::Dispatch) => StatusCode::BAD_GATEWAY,
        Err(SubmissionError::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reply(result: Result<(), SubmissionError>) -> SubmissionReply {
    (status_for(&result), Json(SubmissionResponse::from(result)))
}

fn unreadable_body(form: &str, rejection: JsonRejection) -> SubmissionReply {
    tracing::warn!(form, error = %rejection.body_text(), "Unreadable submission body");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmissionResponse::failure(UNEXPECTED_ERROR_MESSAGE)),
    )
}

pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> SubmissionReply {
    match payload {
        Ok(Json(submission)) => reply(state.service.handle_contact(&submission).await),
        Err(rejection) => unreadable_body("contact", rejection),
    }
}

pub async fn submit_demo_request(
    State(state): State<AppState>,
    payload: Result<Json<DemoRequestSubmission>, JsonRejection>,
) -> SubmissionReply {
    match payload {
        Ok(Json(submission)) => reply(state.service.handle_demo_request(&submission).await),
        Err(rejection) => unreadable_body("demo_request", rejection),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "metrics": state.service.metrics().summary(),
    }))
}

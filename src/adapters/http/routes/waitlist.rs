use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{SignupSubmission, confirmation_message},
    domain::entities::{exam::Exam, signup_variant::SignupVariant},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinResponse {
    email: String,
    exam: Option<Exam>,
    serial_number: i64,
    created_at: DateTime<Utc>,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormResponse {
    variant: SignupVariant,
    exams: &'static [Exam],
    success_revert_seconds: Option<u64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(join))
        .route("/form", get(form))
}

/// POST /api/waitlist
/// Missing fields fall through to validation; an unreadable body is a 400.
async fn join(
    State(app_state): State<AppState>,
    payload: Result<Json<SignupSubmission>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Unreadable signup body");
        AppError::InvalidInput(rejection.body_text())
    })?;
    let entry = app_state.waitlist_use_cases.join(&payload).await?;
    let message = confirmation_message(&entry);

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            email: entry.email,
            exam: entry.exam,
            serial_number: entry.serial_number,
            created_at: entry.created_at,
            message,
        }),
    ))
}

/// GET /api/waitlist/form
/// Tells the page which form to render.
async fn form(State(app_state): State<AppState>) -> impl IntoResponse {
    let variant = app_state.waitlist_use_cases.variant();
    Json(FormResponse {
        variant,
        exams: if variant.requires_exam() { Exam::all() } else { &[] },
        success_revert_seconds: variant.success_revert_after().map(|d| d.as_secs()),
    })
}

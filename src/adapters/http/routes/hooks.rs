use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::welcome_email::DispatchOutcome,
    domain::entities::change_event::ChangeEvent,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/welcome-email", post(welcome_email))
}

/// POST /api/hooks/welcome-email
/// Target of the waitlist table's database webhook. Always answers with a JSON
/// body carrying an explicit `success` flag, including for unreadable payloads.
async fn welcome_email(
    State(app_state): State<AppState>,
    payload: Result<Json<ChangeEvent>, JsonRejection>,
) -> impl IntoResponse {
    let outcome = match payload {
        Ok(Json(event)) => {
            app_state
                .welcome_email_use_cases
                .handle_change_event(&event)
                .await
        }
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Unreadable change event");
            DispatchOutcome::Failed {
                error: rejection.body_text(),
            }
        }
    };

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome.report()))
}

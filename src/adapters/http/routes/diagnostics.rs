use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::adapters::http::app_state::AppState;

#[derive(Deserialize)]
struct TestEmailPayload {
    email: String,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct TestEmailResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/test-email", post(test_email))
}

/// POST /api/diagnostics/test-email
/// Sends a bare test message through SendGrid and echoes what it answered.
async fn test_email(
    State(app_state): State<AppState>,
    payload: Result<Json<TestEmailPayload>, JsonRejection>,
) -> impl IntoResponse {
    let email = match payload {
        Ok(Json(payload)) => payload.email,
        Err(rejection) => {
            return failure(rejection.body_text());
        }
    };

    match app_state
        .diagnostics_use_cases
        .send_test_email(&email)
        .await
    {
        Ok(receipt) => (
            StatusCode::OK,
            Json(TestEmailResponse {
                success: true,
                message: Some("Test email sent".into()),
                status: Some(receipt.status),
                recipient: Some(email),
                response_body: Some(receipt.body),
                ..Default::default()
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Test email failed");
            failure(err.to_string())
        }
    }
}

fn failure(error: String) -> (StatusCode, Json<TestEmailResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(TestEmailResponse {
            success: false,
            error: Some(error),
            ..Default::default()
        }),
    )
}

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{adapters::http::app_state::AppState, infra::webhook_auth::bearer_matches};

/// Guards the routes that send mail on a caller's behalf: the data-store
/// webhook and the diagnostic sender. Callers must present
/// `Authorization: Bearer <WEBHOOK_SECRET>`.
pub async fn require_webhook_secret(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !bearer_matches(&app_state.config.webhook_secret, authorization) {
        tracing::warn!(
            uri = %request.uri(),
            has_authorization = authorization.is_some(),
            "Rejected caller without webhook secret"
        );
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Unauthorized" })),
        )
            .into_response();
    }

    next.run(request).await
}

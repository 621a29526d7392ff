pub mod diagnostics;
pub mod hooks;
pub mod waitlist;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::require_webhook_secret};

pub fn router(app_state: AppState) -> Router<AppState> {
    // Routes that send mail need the shared webhook secret.
    let mailing = Router::new()
        .nest("/hooks", hooks::router())
        .nest("/diagnostics", diagnostics::router())
        .route_layer(middleware::from_fn_with_state(
            app_state,
            require_webhook_secret,
        ));

    Router::new()
        .nest("/waitlist", waitlist::router())
        .merge(mailing)
}

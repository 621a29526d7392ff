use std::sync::Arc;

use crate::{
    application::use_cases::{
        diagnostics::DiagnosticsUseCases, waitlist::WaitlistUseCases,
        welcome_email::WelcomeEmailUseCases,
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub welcome_email_use_cases: Arc<WelcomeEmailUseCases>,
    pub diagnostics_use_cases: Arc<DiagnosticsUseCases>,
}

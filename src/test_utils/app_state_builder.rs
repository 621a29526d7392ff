//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by in-memory mocks. Every
//! port can be swapped; unset ones get a permissive default.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        diagnostics::DiagnosticsUseCases,
        waitlist::{WaitlistRepo, WaitlistUseCases},
        welcome_email::{
            AttachmentFetcher, EmailProvider, WelcomeEmailSettings, WelcomeEmailUseCases,
        },
    },
    domain::entities::{email_provider::EmailProviderKind, signup_variant::SignupVariant},
    infra::config::AppConfig,
    test_utils::{InMemoryWaitlistRepo, RecordingEmailProvider, StubAttachmentFetcher},
};

/// Bearer token the test state expects on mail-sending routes.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_waitlist";

/// # Example
///
/// ```ignore
/// let provider = Arc::new(RecordingEmailProvider::new(EmailProviderKind::EmailJs));
/// let app_state = TestAppStateBuilder::new()
///     .with_variant(SignupVariant::EmailOnly)
///     .with_email_provider(provider.clone())
///     .build();
/// ```
pub struct TestAppStateBuilder {
    variant: SignupVariant,
    waitlist_repo: Option<Arc<dyn WaitlistRepo>>,
    attachment_fetcher: Option<Arc<dyn AttachmentFetcher>>,
    email_provider: Option<Arc<dyn EmailProvider>>,
    diagnostics_provider: Option<Arc<dyn EmailProvider>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            variant: SignupVariant::ExamRequired,
            waitlist_repo: None,
            attachment_fetcher: None,
            email_provider: None,
            diagnostics_provider: None,
        }
    }

    pub fn with_variant(mut self, variant: SignupVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_waitlist_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.waitlist_repo = Some(repo);
        self
    }

    pub fn with_attachment_fetcher(mut self, fetcher: Arc<dyn AttachmentFetcher>) -> Self {
        self.attachment_fetcher = Some(fetcher);
        self
    }

    /// Provider for welcome emails.
    pub fn with_email_provider(mut self, provider: Arc<dyn EmailProvider>) -> Self {
        self.email_provider = Some(provider);
        self
    }

    /// Provider for the diagnostic sender. Left unset, the sender reports
    /// that SendGrid is not configured.
    pub fn with_diagnostics_provider(mut self, provider: Arc<dyn EmailProvider>) -> Self {
        self.diagnostics_provider = Some(provider);
        self
    }

    /// Build with an in-memory store and return it for assertions.
    pub fn build_with_waitlist_repo(self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::new());
        let app_state = self.with_waitlist_repo(repo.clone()).build();
        (app_state, repo)
    }

    pub fn build(self) -> AppState {
        let guide_url = Url::parse("https://prepaired.test/iter8.pdf").unwrap();

        let waitlist_repo: Arc<dyn WaitlistRepo> = self
            .waitlist_repo
            .unwrap_or_else(|| Arc::new(InMemoryWaitlistRepo::new()));
        let attachment_fetcher: Arc<dyn AttachmentFetcher> = self
            .attachment_fetcher
            .unwrap_or_else(|| Arc::new(StubAttachmentFetcher::returning(b"%PDF-1.4")));
        let email_provider: Arc<dyn EmailProvider> = self.email_provider.unwrap_or_else(|| {
            Arc::new(RecordingEmailProvider::new(EmailProviderKind::SendGrid))
        });

        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            database_url: String::new(),
            database_max_connections: 1,
            site_url: Url::parse("https://prepaired.test").unwrap(),
            welcome_guide_path: "iter8.pdf".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
            signup_variant: self.variant,
            email_provider: email_provider.kind(),
            sendgrid: None,
            emailjs: None,
            webhook_secret: SecretString::new(TEST_WEBHOOK_SECRET.into()),
        });

        AppState {
            config,
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(waitlist_repo, self.variant)),
            welcome_email_use_cases: Arc::new(WelcomeEmailUseCases::new(
                attachment_fetcher,
                email_provider,
                WelcomeEmailSettings { guide_url },
            )),
            diagnostics_use_cases: Arc::new(DiagnosticsUseCases::new(self.diagnostics_provider)),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

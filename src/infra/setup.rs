use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        assets::HttpAssetFetcher,
        email::{emailjs::EmailJsEmailProvider, sendgrid::SendGridEmailProvider},
        http::app_state::AppState,
    },
    domain::entities::email_provider::EmailProviderKind,
    infra::{config::AppConfig, http_client::try_build_client, postgres_persistence},
    use_cases::{
        diagnostics::DiagnosticsUseCases,
        waitlist::{WaitlistRepo, WaitlistUseCases},
        welcome_email::{EmailProvider, WelcomeEmailSettings, WelcomeEmailUseCases},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let postgres_arc = Arc::new(
        postgres_persistence(&config.database_url, config.database_max_connections).await?,
    );
    let waitlist_repo_arc = postgres_arc.clone() as Arc<dyn WaitlistRepo>;

    let client = try_build_client().context("Failed to build HTTP client")?;

    let welcome_provider: Arc<dyn EmailProvider> = match config.email_provider {
        EmailProviderKind::SendGrid => {
            let sendgrid = config
                .sendgrid
                .clone()
                .context("SendGrid credentials missing")?;
            Arc::new(SendGridEmailProvider::new(
                client.clone(),
                sendgrid.api_key,
                sendgrid.from_email,
                Some(sendgrid.reply_to),
            ))
        }
        EmailProviderKind::EmailJs => {
            let credentials = config
                .emailjs
                .clone()
                .context("EmailJS credentials missing")?;
            Arc::new(EmailJsEmailProvider::new(client.clone(), credentials))
        }
    };

    // Test emails go out without a reply-to.
    let diagnostics_provider = config.sendgrid.clone().map(|sendgrid| {
        Arc::new(SendGridEmailProvider::new(
            client.clone(),
            sendgrid.api_key,
            sendgrid.from_email,
            None,
        )) as Arc<dyn EmailProvider>
    });

    let guide_url = config.guide_url()?;
    info!(
        provider = welcome_provider.kind().as_ref(),
        variant = config.signup_variant.as_ref(),
        guide_url = %guide_url,
        "Configured waitlist"
    );

    let waitlist_use_cases = WaitlistUseCases::new(waitlist_repo_arc, config.signup_variant);
    let welcome_email_use_cases = WelcomeEmailUseCases::new(
        Arc::new(HttpAssetFetcher::new(client)),
        welcome_provider,
        WelcomeEmailSettings { guide_url },
    );
    let diagnostics_use_cases = DiagnosticsUseCases::new(diagnostics_provider);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        welcome_email_use_cases: Arc::new(welcome_email_use_cases),
        diagnostics_use_cases: Arc::new(diagnostics_use_cases),
    })
}

/// Install the global subscriber. Later calls are no-ops and leave `app.log`
/// untouched.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}

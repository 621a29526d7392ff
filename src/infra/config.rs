use std::net::SocketAddr;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    adapters::email::emailjs::EmailJsCredentials,
    domain::entities::{email_provider::EmailProviderKind, signup_variant::SignupVariant},
};

pub const DEFAULT_REPLY_TO: &str = "help.prepaired@gmail.com";

#[derive(Clone)]
pub struct SendGridConfig {
    pub api_key: SecretString,
    pub from_email: String,
    pub reply_to: String,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Public site that serves the welcome guide.
    pub site_url: Url,
    pub welcome_guide_path: String,
    pub cors_origin: HeaderValue,
    pub signup_variant: SignupVariant,
    /// Provider used for welcome emails.
    pub email_provider: EmailProviderKind,
    /// Also backs the diagnostic sender, whichever provider is active.
    pub sendgrid: Option<SendGridConfig>,
    pub emailjs: Option<EmailJsCredentials>,
    /// Bearer token the data-store webhook and diagnostic callers present.
    pub webhook_secret: SecretString,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse()?);
        let database_url: String = get_env("DATABASE_URL");
        let webhook_secret = SecretString::new(get_env::<String>("WEBHOOK_SECRET").into());
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let site_url: Url = get_env("SITE_URL");
        let welcome_guide_path: String =
            get_env_default("WELCOME_GUIDE_PATH", "iter8.pdf".to_string());
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:5173"))
                .parse()
                .context("CORS_ORIGIN must be a valid header value")?;

        let signup_variant: SignupVariant =
            get_env_default("SIGNUP_VARIANT", String::from("exam_required"))
                .parse()
                .context("SIGNUP_VARIANT must be exam_required or email_only")?;
        let email_provider: EmailProviderKind =
            get_env_default("EMAIL_PROVIDER", String::from("sendgrid"))
                .parse()
                .context("EMAIL_PROVIDER must be sendgrid or emailjs")?;

        let sendgrid = match (optional_env("SENDGRID_API_KEY"), optional_env("SENDGRID_FROM_EMAIL")) {
            (Some(api_key), Some(from_email)) => Some(SendGridConfig {
                api_key: SecretString::new(api_key.into()),
                from_email,
                reply_to: get_env_default("SENDGRID_REPLY_TO", DEFAULT_REPLY_TO.to_string()),
            }),
            _ => None,
        };

        let emailjs = match (
            optional_env("EMAILJS_SERVICE_ID"),
            optional_env("EMAILJS_TEMPLATE_ID"),
            optional_env("EMAILJS_PUBLIC_KEY"),
            optional_env("EMAILJS_PRIVATE_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key), Some(private_key)) => {
                Some(EmailJsCredentials {
                    service_id,
                    template_id,
                    public_key,
                    private_key: SecretString::new(private_key.into()),
                })
            }
            _ => None,
        };

        let config = Self {
            bind_addr,
            database_url,
            database_max_connections,
            site_url,
            welcome_guide_path,
            cors_origin,
            signup_variant,
            email_provider,
            sendgrid,
            emailjs,
            webhook_secret,
        };
        config.validate()?;
        Ok(config)
    }

    /// The selected welcome provider must have its credentials and the
    /// webhook secret must not be blank.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.webhook_secret.expose_secret().trim().is_empty() {
            bail!("WEBHOOK_SECRET must not be empty");
        }
        match self.email_provider {
            EmailProviderKind::SendGrid if self.sendgrid.is_none() => {
                bail!("EMAIL_PROVIDER=sendgrid requires SENDGRID_API_KEY and SENDGRID_FROM_EMAIL")
            }
            EmailProviderKind::EmailJs if self.emailjs.is_none() => bail!(
                "EMAIL_PROVIDER=emailjs requires EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID, EMAILJS_PUBLIC_KEY and EMAILJS_PRIVATE_KEY"
            ),
            _ => Ok(()),
        }
    }

    /// `<SITE_URL>/<WELCOME_GUIDE_PATH>`, keeping any path already on the site URL.
    pub fn guide_url(&self) -> anyhow::Result<Url> {
        let mut base = self.site_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.welcome_guide_path.trim_start_matches('/'))
            .with_context(|| format!("invalid WELCOME_GUIDE_PATH {}", self.welcome_guide_path))
    }
}

/// Unset and empty are treated alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

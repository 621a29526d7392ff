use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::welcome_email::{
        Attachment, DeliveryReceipt, EmailProvider, OutboundEmail,
    },
    domain::entities::email_provider::EmailProviderKind,
};

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: SecretString,
}

/// EmailJS REST send. The API has no attachments, so the template gets a
/// download link for the guide instead.
#[derive(Clone)]
pub struct EmailJsEmailProvider {
    client: Client,
    endpoint: String,
    credentials: EmailJsCredentials,
}

impl EmailJsEmailProvider {
    pub fn new(client: Client, credentials: EmailJsCredentials) -> Self {
        Self {
            client,
            endpoint: EMAILJS_SEND_URL.to_string(),
            credentials,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body<'a>(&'a self, message: &'a OutboundEmail) -> EmailJsReq<'a> {
        EmailJsReq {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.public_key,
            access_token: self.credentials.private_key.expose_secret(),
            template_params: TemplateParams {
                to_email: &message.to,
                to_name: message.to_name.as_deref().unwrap_or_default(),
                subject: &message.subject,
                message: &message.text,
                pdf_download_link: message.download_link.as_deref(),
            },
        }
    }
}

#[derive(Serialize)]
struct EmailJsReq<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken")]
    access_token: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to_name: &'a str,
    subject: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_download_link: Option<&'a str>,
}

#[async_trait]
impl EmailProvider for EmailJsEmailProvider {
    fn kind(&self) -> EmailProviderKind {
        EmailProviderKind::EmailJs
    }

    async fn send(
        &self,
        message: &OutboundEmail,
        _attachment: Option<&Attachment>,
    ) -> AppResult<DeliveryReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("EmailJS request failed: {e}")))?;

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read EmailJS response body");
                format!("<unreadable response body: {e}>")
            }
        };

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "EmailJS send failed: {} - {}",
                status.as_u16(),
                text
            )));
        }

        Ok(DeliveryReceipt {
            provider: EmailProviderKind::EmailJs,
            status: status.as_u16(),
            message_id: None,
            body: text,
        })
    }
}

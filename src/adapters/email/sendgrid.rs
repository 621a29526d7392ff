use async_trait::async_trait;
use chrono::Utc;
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

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const SENDER_NAME: &str = "prepAIred Team";
const REPLY_TO_NAME: &str = "prepAIred Support";

/// SendGrid v3 mail/send. Supports attachments.
#[derive(Clone)]
pub struct SendGridEmailProvider {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    from_email: String,
    reply_to: Option<String>,
}

impl SendGridEmailProvider {
    pub fn new(
        client: Client,
        api_key: SecretString,
        from_email: String,
        reply_to: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: SENDGRID_SEND_URL.to_string(),
            api_key,
            from_email,
            reply_to,
        }
    }

    /// Send to another mail/send URL instead of the public API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body<'a>(
        &'a self,
        message: &'a OutboundEmail,
        attachment: Option<&'a Attachment>,
    ) -> SendGridReq<'a> {
        SendGridReq {
            personalizations: [Personalization {
                to: [Address {
                    email: &message.to,
                    name: message.to_name.as_deref(),
                }],
                subject: &message.subject,
            }],
            from: Address {
                email: &self.from_email,
                name: Some(SENDER_NAME),
            },
            reply_to: self.reply_to.as_deref().map(|email| Address {
                email,
                name: Some(REPLY_TO_NAME),
            }),
            content: [
                Content {
                    kind: "text/plain",
                    value: &message.text,
                },
                Content {
                    kind: "text/html",
                    value: &message.html,
                },
            ],
            attachments: attachment
                .map(|a| SendGridAttachment {
                    content: &a.content_base64,
                    filename: &a.filename,
                    content_type: &a.content_type,
                    disposition: "attachment",
                })
                .into_iter()
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct SendGridReq<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address<'a>>,
    content: [Content<'a>; 2],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<SendGridAttachment<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
    subject: &'a str,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendGridAttachment<'a> {
    content: &'a str,
    filename: &'a str,
    #[serde(rename = "type")]
    content_type: &'a str,
    disposition: &'a str,
}

#[async_trait]
impl EmailProvider for SendGridEmailProvider {
    fn kind(&self) -> EmailProviderKind {
        EmailProviderKind::SendGrid
    }

    async fn send(
        &self,
        message: &OutboundEmail,
        attachment: Option<&Attachment>,
    ) -> AppResult<DeliveryReceipt> {
        let body = self.request_body(message, attachment);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("SendGrid request failed: {e}")))?;

        let status = response.status();
        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read SendGrid response body");
                format!("<unreadable response body: {e}>")
            }
        };
        tracing::debug!(status = status.as_u16(), "SendGrid responded");

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "SendGrid send failed: {} - {}",
                status.as_u16(),
                text
            )));
        }

        // SendGrid answers 202 with the id in a header; fall back to a local one.
        let message_id =
            message_id.unwrap_or_else(|| format!("sendgrid-{}", Utc::now().timestamp_millis()));

        Ok(DeliveryReceipt {
            provider: EmailProviderKind::SendGrid,
            status: status.as_u16(),
            message_id: Some(message_id),
            body: text,
        })
    }
}

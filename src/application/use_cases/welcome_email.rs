use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::email_templates::{
        GuideDelivery, RenderedEmail, WELCOME_GUIDE_FILENAME, WELCOME_RECIPIENT_NAME,
        welcome_email,
    },
    domain::entities::{change_event::ChangeEvent, email_provider::EmailProviderKind},
};

/// Input bytes per base64 call. A multiple of 3 so the encoded chunks
/// concatenate without padding in the middle.
pub const ENCODE_CHUNK_BYTES: usize = 6 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    /// Standard base64, padded.
    pub content_base64: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Where the guide can be downloaded, for providers that cannot attach it.
    pub download_link: Option<String>,
}

impl OutboundEmail {
    pub fn from_rendered(to: &str, to_name: Option<&str>, rendered: RenderedEmail) -> Self {
        Self {
            to: to.to_string(),
            to_name: to_name.map(str::to_string),
            subject: rendered.subject,
            text: rendered.text,
            html: rendered.html,
            download_link: None,
        }
    }
}

/// What the provider said after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub provider: EmailProviderKind,
    pub status: u16,
    pub message_id: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    fn kind(&self) -> EmailProviderKind;

    /// Send one message. Providers that cannot attach files ignore
    /// `attachment`. A non-success answer is an `AppError::Upstream` carrying
    /// the status and response body.
    async fn send(
        &self,
        message: &OutboundEmail,
        attachment: Option<&Attachment>,
    ) -> AppResult<DeliveryReceipt>;
}

#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct WelcomeEmailSettings {
    /// Public URL of the welcome guide PDF.
    pub guide_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not an insert on the waitlist table; nothing was fetched or sent.
    Ignored,
    Sent {
        recipient: String,
        receipt: DeliveryReceipt,
    },
    Failed {
        error: String,
    },
}

/// JSON body returned to the webhook caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, DispatchOutcome::Failed { .. })
    }

    pub fn report(&self) -> DispatchReport {
        let empty = DispatchReport {
            success: self.is_success(),
            message: None,
            recipient: None,
            service: None,
            email_id: None,
            note: None,
            error: None,
        };
        match self {
            DispatchOutcome::Ignored => DispatchReport {
                message: Some("Event ignored".into()),
                ..empty
            },
            DispatchOutcome::Sent { recipient, receipt } => DispatchReport {
                message: Some(format!(
                    "Welcome email sent successfully via {}",
                    receipt.provider.display_name()
                )),
                recipient: Some(recipient.clone()),
                service: Some(receipt.provider.as_ref().to_string()),
                email_id: receipt.message_id.clone(),
                note: (!receipt.provider.supports_attachments()).then(|| {
                    format!(
                        "PDF available as download link ({} doesn't support direct attachments)",
                        receipt.provider.display_name()
                    )
                }),
                ..empty
            },
            DispatchOutcome::Failed { error } => DispatchReport {
                error: Some(error.clone()),
                ..empty
            },
        }
    }
}

/// Base64-encode `bytes` one fixed-size slice at a time.
pub fn encode_base64_chunked(bytes: &[u8]) -> String {
    let engine = &base64::engine::general_purpose::STANDARD;
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(ENCODE_CHUNK_BYTES) {
        engine.encode_string(chunk, &mut out);
    }
    out
}

#[derive(Clone)]
pub struct WelcomeEmailUseCases {
    fetcher: Arc<dyn AttachmentFetcher>,
    provider: Arc<dyn EmailProvider>,
    settings: WelcomeEmailSettings,
}

impl WelcomeEmailUseCases {
    pub fn new(
        fetcher: Arc<dyn AttachmentFetcher>,
        provider: Arc<dyn EmailProvider>,
        settings: WelcomeEmailSettings,
    ) -> Self {
        Self {
            fetcher,
            provider,
            settings,
        }
    }

    /// Handle one change event from the waitlist trigger. Never fails: errors
    /// end up in `DispatchOutcome::Failed`. A failed send is not retried here;
    /// redelivery is up to the trigger.
    #[instrument(skip(self, event), fields(table = %event.table, provider = %self.provider.kind()))]
    pub async fn handle_change_event(&self, event: &ChangeEvent) -> DispatchOutcome {
        if !event.is_waitlist_insert() {
            debug!(event_type = ?event.event_type, "Ignoring change event");
            return DispatchOutcome::Ignored;
        }

        match self.deliver(event).await {
            Ok((recipient, receipt)) => {
                info!(
                    recipient = %recipient,
                    status = receipt.status,
                    message_id = ?receipt.message_id,
                    "Welcome email sent"
                );
                DispatchOutcome::Sent { recipient, receipt }
            }
            Err(err) => {
                error!(error = %err, "Welcome email dispatch failed");
                DispatchOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    async fn deliver(&self, event: &ChangeEvent) -> AppResult<(String, DeliveryReceipt)> {
        let record = event
            .waitlist_record()
            .map_err(|e| AppError::InvalidInput(format!("Waitlist record is unusable: {e}")))?;
        info!(
            recipient = %record.email,
            serial_number = ?record.serial_number,
            "Sending welcome email"
        );

        let pdf = self.fetcher.fetch(&self.settings.guide_url).await?;
        let attachment = Attachment {
            filename: WELCOME_GUIDE_FILENAME.to_string(),
            content_type: "application/pdf".to_string(),
            content_base64: encode_base64_chunked(&pdf),
        };

        let kind = self.provider.kind();
        let guide = if kind.supports_attachments() {
            GuideDelivery::Attached
        } else {
            GuideDelivery::Link(&self.settings.guide_url)
        };
        let mut message = OutboundEmail::from_rendered(
            &record.email,
            Some(WELCOME_RECIPIENT_NAME),
            welcome_email(guide),
        );
        message.download_link = Some(self.settings.guide_url.to_string());

        let receipt = self
            .provider
            .send(
                &message,
                kind.supports_attachments().then_some(&attachment),
            )
            .await?;

        Ok((record.email, receipt))
    }
}

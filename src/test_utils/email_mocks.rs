//! Email provider and PDF fetcher mocks.

use async_trait::async_trait;
use std::sync::Mutex;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::welcome_email::{
        Attachment, AttachmentFetcher, DeliveryReceipt, EmailProvider, OutboundEmail,
    },
    domain::entities::email_provider::EmailProviderKind,
};

/// Records every message. Accepts with status 202 and ids `recorded-1`,
/// `recorded-2`, ..., or rejects every send when built with `rejecting`.
pub struct RecordingEmailProvider {
    kind: EmailProviderKind,
    rejection: Option<String>,
    sent: Mutex<Vec<(OutboundEmail, Option<Attachment>)>>,
    attempts: Mutex<usize>,
}

impl RecordingEmailProvider {
    pub fn new(kind: EmailProviderKind) -> Self {
        Self {
            kind,
            rejection: None,
            sent: Mutex::new(vec![]),
            attempts: Mutex::new(0),
        }
    }

    pub fn rejecting(kind: EmailProviderKind, message: &str) -> Self {
        Self {
            rejection: Some(message.to_string()),
            ..Self::new(kind)
        }
    }

    /// Accepted messages only.
    pub fn sent(&self) -> Vec<(OutboundEmail, Option<Attachment>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl EmailProvider for RecordingEmailProvider {
    fn kind(&self) -> EmailProviderKind {
        self.kind
    }

    async fn send(
        &self,
        message: &OutboundEmail,
        attachment: Option<&Attachment>,
    ) -> AppResult<DeliveryReceipt> {
        *self.attempts.lock().unwrap() += 1;

        if let Some(rejection) = &self.rejection {
            return Err(AppError::Upstream(rejection.clone()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push((message.clone(), attachment.cloned()));
        Ok(DeliveryReceipt {
            provider: self.kind,
            status: 202,
            message_id: Some(format!("recorded-{}", sent.len())),
            body: String::new(),
        })
    }
}

/// Serves fixed bytes for any URL, or fails every fetch.
pub struct StubAttachmentFetcher {
    bytes: Option<Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl StubAttachmentFetcher {
    pub fn returning(bytes: &[u8]) -> Self {
        Self {
            bytes: Some(bytes.to_vec()),
            requested: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            bytes: None,
            requested: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentFetcher for StubAttachmentFetcher {
    async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.bytes.clone().ok_or_else(|| {
            AppError::Upstream("Failed to fetch PDF file: 404 Not Found".into())
        })
    }
}

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        email_templates::test_email,
        use_cases::welcome_email::{DeliveryReceipt, EmailProvider, OutboundEmail},
        validators::{is_plausible_email, normalize_email},
    },
};

/// Manual check that the SendGrid credentials work. No business logic.
#[derive(Clone)]
pub struct DiagnosticsUseCases {
    sendgrid: Option<Arc<dyn EmailProvider>>,
}

impl DiagnosticsUseCases {
    pub fn new(sendgrid: Option<Arc<dyn EmailProvider>>) -> Self {
        Self { sendgrid }
    }

    #[instrument(skip(self))]
    pub async fn send_test_email(&self, to: &str) -> AppResult<DeliveryReceipt> {
        let provider = self
            .sendgrid
            .as_ref()
            .ok_or_else(|| AppError::Config("SendGrid is not configured".into()))?;

        if !is_plausible_email(to) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }

        let message = OutboundEmail::from_rendered(&normalize_email(to), None, test_email());
        let receipt = provider.send(&message, None).await?;
        info!(status = receipt.status, body = %receipt.body, "Test email accepted");
        Ok(receipt)
    }
}

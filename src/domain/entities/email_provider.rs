use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// External email delivery API used for the welcome message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmailProviderKind {
    #[default]
    SendGrid,
    EmailJs,
}

impl EmailProviderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EmailProviderKind::SendGrid => "SendGrid",
            EmailProviderKind::EmailJs => "EmailJS",
        }
    }

    /// Whether the provider API accepts file attachments.
    /// Providers without attachment support get a download link instead.
    pub fn supports_attachments(&self) -> bool {
        matches!(self, EmailProviderKind::SendGrid)
    }
}

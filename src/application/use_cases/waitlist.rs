use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{is_plausible_email, normalize_email},
    domain::entities::{
        exam::Exam,
        signup_variant::SignupVariant,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
};

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Insert a signup. A second insert for the same email must fail with
    /// `AppError::Conflict`; an unreachable store with `AppError::Unavailable`.
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry>;
}

/// Raw form values as typed by the visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupSubmission {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub exam: Option<String>,
}

/// Every way a signup can fail, each with the message shown under the form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupError {
    #[error("Please select an exam")]
    MissingExam,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("This email is already on the waitlist!")]
    AlreadyOnWaitlist,

    #[error("Something went wrong. Please try again.")]
    Store,

    #[error("Network error. Please check your connection.")]
    Network,
}

impl SignupError {
    /// Rejected before the store was contacted.
    pub fn is_validation(&self) -> bool {
        matches!(self, SignupError::MissingExam | SignupError::InvalidEmail)
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        let msg = err.to_string();
        match err {
            SignupError::MissingExam | SignupError::InvalidEmail => AppError::InvalidInput(msg),
            SignupError::AlreadyOnWaitlist => AppError::Conflict(msg),
            SignupError::Network => AppError::Unavailable(msg),
            SignupError::Store => AppError::Database(msg),
        }
    }
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    variant: SignupVariant,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>, variant: SignupVariant) -> Self {
        Self { repo, variant }
    }

    pub fn variant(&self) -> SignupVariant {
        self.variant
    }

    /// Validate and normalize a submission without touching the store.
    ///
    /// The exam is checked before the email, matching the order of the fields
    /// on the form. In the email-only variant any submitted exam is dropped.
    pub fn prepare(
        &self,
        submission: &SignupSubmission,
        now: DateTime<Utc>,
    ) -> Result<NewWaitlistEntry, SignupError> {
        let exam = if self.variant.requires_exam() {
            let exam = submission
                .exam
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .and_then(|raw| raw.parse::<Exam>().ok())
                .ok_or(SignupError::MissingExam)?;
            Some(exam)
        } else {
            None
        };

        if !is_plausible_email(&submission.email) {
            return Err(SignupError::InvalidEmail);
        }

        Ok(NewWaitlistEntry {
            email: normalize_email(&submission.email),
            exam,
            created_at: now,
        })
    }

    /// Write one prepared entry. No retry: the visitor can resubmit.
    #[instrument(skip(self, entry), fields(email = %entry.email))]
    pub async fn insert(&self, entry: &NewWaitlistEntry) -> Result<WaitlistEntry, SignupError> {
        match self.repo.insert(entry).await {
            Ok(stored) => {
                info!(serial_number = stored.serial_number, "Joined waitlist");
                Ok(stored)
            }
            Err(AppError::Conflict(_)) => {
                info!("Email already on waitlist");
                Err(SignupError::AlreadyOnWaitlist)
            }
            Err(AppError::Unavailable(reason)) => {
                error!(reason = %reason, "Waitlist store unreachable");
                Err(SignupError::Network)
            }
            Err(err) => {
                error!(error = %err, "Waitlist insert failed");
                Err(SignupError::Store)
            }
        }
    }

    pub async fn join(&self, submission: &SignupSubmission) -> Result<WaitlistEntry, SignupError> {
        let entry = self.prepare(submission, Utc::now())?;
        self.insert(&entry).await
    }
}

/// Confirmation shown once a signup is stored.
pub fn confirmation_message(entry: &WaitlistEntry) -> String {
    match entry.exam {
        Some(exam) => format!(
            "Thank you for registering for the {} exam. We'll notify you at {} as soon as we're ready.",
            exam, entry.email
        ),
        None => format!(
            "You're on the list! We'll notify you at {} as soon as we're ready.",
            entry.email
        ),
    }
}

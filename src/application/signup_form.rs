//! State machine behind the landing page signup form.
//!
//! The form is always in one of four visible states: idle, submitting,
//! success or error with a message. `submit` never returns an error; every
//! outcome is folded into the form state. Variant rules (exam required,
//! auto-revert) come from the `WaitlistUseCases` the form submits to.

use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;

use crate::application::use_cases::waitlist::{
    SignupError, SignupSubmission, WaitlistUseCases, confirmation_message,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    /// Selected exam label, empty when nothing is selected.
    pub exam: String,
    is_submitting: bool,
    status: SubmitStatus,
    error_message: String,
    submitted_email: String,
    submitted_exam: String,
    confirmation: String,
    succeeded_at: Option<Instant>,
    /// Set on success when the variant reverts the success state.
    revert_after: Option<Duration>,
}

/// Snapshot of what the form renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupView {
    pub status: SubmitStatus,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub submitted_email: Option<String>,
    pub submitted_exam: Option<String>,
    pub confirmation: Option<String>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Inputs and the submit button are disabled while this is set.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        (self.status == SubmitStatus::Error).then_some(self.error_message.as_str())
    }

    pub fn submitted_email(&self) -> &str {
        &self.submitted_email
    }

    pub fn submitted_exam(&self) -> &str {
        &self.submitted_exam
    }

    pub async fn submit(&mut self, waitlist: &WaitlistUseCases) {
        let submission = SignupSubmission {
            email: self.email.clone(),
            exam: (!self.exam.is_empty()).then(|| self.exam.clone()),
        };

        let entry = match waitlist.prepare(&submission, Utc::now()) {
            Ok(entry) => entry,
            Err(err) => {
                self.fail(err);
                return;
            }
        };

        self.is_submitting = true;
        self.status = SubmitStatus::Idle;
        self.error_message.clear();

        match waitlist.insert(&entry).await {
            Ok(stored) => {
                self.status = SubmitStatus::Success;
                self.submitted_email = stored.email.clone();
                self.submitted_exam = stored.exam.map(|e| e.to_string()).unwrap_or_default();
                self.confirmation = confirmation_message(&stored);
                self.succeeded_at = Some(Instant::now());
                self.revert_after = waitlist.variant().success_revert_after();
                self.email.clear();
                self.exam.clear();
            }
            Err(err) => self.fail(err),
        }

        self.is_submitting = false;
    }

    /// Return to the empty form once the success state has been shown long
    /// enough. Only the email-only variant reverts; the stored row is untouched.
    pub fn tick(&mut self, now: Instant) {
        let (Some(since), Some(after)) = (self.succeeded_at, self.revert_after)
        else {
            return;
        };
        if self.status == SubmitStatus::Success && now.saturating_duration_since(since) >= after {
            self.status = SubmitStatus::Idle;
            self.succeeded_at = None;
            self.revert_after = None;
        }
    }

    /// Time left before `tick` reverts the success state.
    pub fn revert_in(&self, now: Instant) -> Option<Duration> {
        let since = self.succeeded_at?;
        let after = self.revert_after?;
        Some(after.saturating_sub(now.saturating_duration_since(since)))
    }

    pub fn view(&self) -> SignupView {
        let success = self.status == SubmitStatus::Success;
        SignupView {
            status: self.status,
            is_submitting: self.is_submitting,
            error_message: self.error_message().map(str::to_string),
            submitted_email: success.then(|| self.submitted_email.clone()),
            submitted_exam: (success && !self.submitted_exam.is_empty())
                .then(|| self.submitted_exam.clone()),
            confirmation: success.then(|| self.confirmation.clone()),
        }
    }

    fn fail(&mut self, err: SignupError) {
        self.status = SubmitStatus::Error;
        self.error_message = err.to_string();
    }
}

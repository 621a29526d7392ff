use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Which signup form the landing page runs.
///
/// The first release segmented signups by exam and echoed the chosen exam back
/// in the confirmation. The later release only asks for an email and flips the
/// confirmation back to the empty form after a few seconds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SignupVariant {
    #[default]
    ExamRequired,
    EmailOnly,
}

const SUCCESS_REVERT_AFTER: Duration = Duration::from_secs(5);

impl SignupVariant {
    pub fn requires_exam(&self) -> bool {
        matches!(self, SignupVariant::ExamRequired)
    }

    /// How long the success state stays visible before the form resets.
    pub fn success_revert_after(&self) -> Option<Duration> {
        match self {
            SignupVariant::ExamRequired => None,
            SignupVariant::EmailOnly => Some(SUCCESS_REVERT_AFTER),
        }
    }
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Entrance exam a waitlist signup is preparing for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Exam {
    Jee,
    Neet,
}

impl Exam {
    pub fn all() -> &'static [Exam] {
        &[Exam::Jee, Exam::Neet]
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::exam::Exam;

/// Name of the table that holds signups. Change events from any other table
/// are ignored by the welcome email dispatcher.
pub const WAITLIST_TABLE: &str = "waitlist";

/// A signup as stored in the waitlist table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub serial_number: i64,
    pub email: String,
    pub exam: Option<Exam>,
    pub created_at: DateTime<Utc>,
}

/// The normalized row the submission handler asks the store to insert.
/// `id` and `serial_number` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub exam: Option<Exam>,
    pub created_at: DateTime<Utc>,
}

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::waitlist_entry::WAITLIST_TABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeEventType {
    Insert,
    Update,
    Delete,
    #[serde(other)]
    Unknown,
}

/// Row change envelope posted by the data store's database webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub event_type: ChangeEventType,
    pub table: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub record: JsonValue,
    #[serde(default)]
    pub old_record: JsonValue,
}

/// The `record` of an insert on the waitlist table.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitlistRecord {
    #[serde(default)]
    pub id: Option<JsonValue>,
    pub email: String,
    #[serde(default)]
    pub exam: Option<String>,
    #[serde(default)]
    pub serial_number: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ChangeEvent {
    /// Only freshly inserted waitlist rows get a welcome email. The trigger can
    /// also fire for updates, deletes or other tables.
    pub fn is_waitlist_insert(&self) -> bool {
        self.event_type == ChangeEventType::Insert && self.table == WAITLIST_TABLE
    }

    pub fn waitlist_record(&self) -> Result<WaitlistRecord, serde_json::Error> {
        WaitlistRecord::deserialize(&self.record)
    }
}

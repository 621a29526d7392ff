//! Test data factories. Use the closure parameter to override specific fields.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{exam::Exam, waitlist_entry::WaitlistEntry};

/// Create a stored waitlist entry with sensible defaults.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        id: Uuid::new_v4(),
        serial_number: 1,
        email: "user@example.com".to_string(),
        exam: Some(Exam::Neet),
        created_at: test_datetime(),
    };
    overrides(&mut entry);
    entry
}

/// Fixed timestamp for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
}

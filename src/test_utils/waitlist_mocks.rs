//! In-memory mock implementations for the waitlist store.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

/// In-memory implementation of WaitlistRepo with the same unique-email rule
/// as the real table.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    /// Every insert attempt, accepted or not.
    pub inserts: Mutex<Vec<NewWaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with existing signups.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            inserts: Mutex::new(vec![]),
        }
    }

    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn inserts(&self) -> Vec<NewWaitlistEntry> {
        self.inserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        self.inserts.lock().unwrap().push(entry.clone());

        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|e| e.email == entry.email) {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint \"waitlist_email_key\"".into(),
            ));
        }

        let stored = WaitlistEntry {
            id: Uuid::new_v4(),
            serial_number: entries.len() as i64 + 1,
            email: entry.email.clone(),
            exam: entry.exam,
            created_at: entry.created_at,
        };
        entries.push(stored.clone());
        Ok(stored)
    }
}

/// Store that always fails the same way.
pub struct FailingWaitlistRepo {
    unreachable: bool,
}

impl FailingWaitlistRepo {
    pub fn database() -> Self {
        Self { unreachable: false }
    }

    pub fn unavailable() -> Self {
        Self { unreachable: true }
    }
}

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn insert(&self, _entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        if self.unreachable {
            Err(AppError::Unavailable("connection refused".into()))
        } else {
            Err(AppError::Database("relation \"waitlist\" does not exist".into()))
        }
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::{
        exam::Exam,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
};

// Waitlist row as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistRow {
    id: Uuid,
    serial_number: i64,
    email: String,
    exam: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WaitlistRow> for WaitlistEntry {
    type Error = AppError;

    fn try_from(row: WaitlistRow) -> Result<Self, Self::Error> {
        let exam = row
            .exam
            .as_deref()
            .map(str::parse::<Exam>)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Unknown exam in waitlist row: {e}")))?;
        Ok(WaitlistEntry {
            id: row.id,
            serial_number: row.serial_number,
            email: row.email,
            exam,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let row = sqlx::query_as::<_, WaitlistRow>(
            r#"INSERT INTO waitlist (email, exam, created_at)
               VALUES ($1, $2, $3)
               RETURNING id, serial_number, email, exam, created_at"#,
        )
        .bind(&entry.email)
        .bind(entry.exam.map(|e| e.as_ref().to_string()))
        .bind(entry.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;

        row.try_into()
    }
}

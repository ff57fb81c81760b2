//! Account service orchestrating the record store, the schedule engine,
//! and the note ledger

use std::collections::BTreeMap;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::Utc;
use common::error::StoreError;
use common::store::JsonStore;
use serde::Serialize;
use tracing::info;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{NoteEntry, ScheduleItem, UserRecord, Weekday, WeeklySchedule};
use crate::{notes, schedule};

/// Everything that happens for one user on one calendar date
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: String,
    pub items: Vec<ScheduleItem>,
    pub notes: Vec<NoteEntry>,
}

/// Account service
#[derive(Clone)]
pub struct AccountService {
    store: JsonStore<UserRecord>,
}

impl AccountService {
    /// Create a new account service over the user record store
    pub fn new(store: JsonStore<UserRecord>) -> Self {
        Self { store }
    }

    /// Register a new user
    ///
    /// The fresh record carries all seven weekdays mapped to empty lists and
    /// no notes. The duplicate check runs inside the store's critical
    /// section, so two racing registrations cannot both claim a name.
    pub async fn register(&self, username: &str, password: &str) -> PlannerResult<UserRecord> {
        info!("Registering user: {}", username);

        // Hash the password
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PlannerError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        let record = UserRecord::new(username, password_hash);
        self.store.insert(record).await.map_err(|e| match e {
            StoreError::DuplicateKey(_) => PlannerError::DuplicateUser,
            other => PlannerError::Storage(other),
        })
    }

    /// Find a user record by username
    pub async fn find(&self, username: &str) -> Option<UserRecord> {
        self.store.find(username).await
    }

    /// Verify a user's credentials
    ///
    /// Returns the record on success. Unknown users and wrong passwords are
    /// both reported as `Unauthorized`.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> PlannerResult<UserRecord> {
        let record = self
            .store
            .find(username)
            .await
            .ok_or(PlannerError::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&record.password_hash)
            .map_err(|e| PlannerError::Internal(format!("Failed to parse password hash: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PlannerError::Unauthorized)?;

        Ok(record)
    }

    /// Replace a user's weekly schedule wholesale
    ///
    /// Raw text is parsed per weekday; weekdays missing from the input get
    /// empty lists. This is a full-map replace, never a per-day patch, but
    /// it leaves the record's notes untouched.
    pub async fn set_weekly_schedule(
        &self,
        username: &str,
        raw_days: &BTreeMap<Weekday, String>,
    ) -> PlannerResult<UserRecord> {
        info!("Replacing weekly schedule for user: {}", username);

        let mut days: BTreeMap<Weekday, Vec<ScheduleItem>> = BTreeMap::new();
        for day in Weekday::ALL {
            let raw = raw_days.get(&day).map(String::as_str).unwrap_or_default();
            days.insert(day, schedule::parse_schedule_text(raw));
        }
        let weekly = WeeklySchedule::from_days(days);

        self.store
            .update(username, |record| {
                record.weekly_schedule = weekly;
                record.clone()
            })
            .await
            .map_err(Self::not_found_or_storage)
    }

    /// Resolve everything that happens for a user on one calendar date
    ///
    /// Combines the weekday's recurring items with the notes created for
    /// that exact date; a missing record or absent key resolves to empty.
    pub async fn resolve_day(&self, username: &str, date_str: &str) -> PlannerResult<DayView> {
        let date = schedule::validate_date(date_str)?;
        let day = schedule::weekday_of(date);
        info!(
            "Resolving {} as {} for user: {}",
            date_str,
            day.as_str(),
            username
        );

        let record = self.store.find(username).await;
        let (items, day_notes) = match &record {
            Some(record) => (
                record.weekly_schedule.items_for(day).to_vec(),
                record.notes_for(date_str).to_vec(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        Ok(DayView {
            date: date_str.to_string(),
            items,
            notes: day_notes,
        })
    }

    /// Append a note for one calendar date and persist the record
    ///
    /// The date defaults to the current UTC date when not supplied. The
    /// append runs inside the store's critical section, so a racing
    /// schedule replace for the same user can never clobber it.
    pub async fn add_note(
        &self,
        username: &str,
        date_str: Option<&str>,
        text: &str,
    ) -> PlannerResult<NoteEntry> {
        let date_str = match date_str {
            Some(s) => {
                schedule::validate_date(s)?;
                s.to_string()
            }
            None => Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        };
        info!("Adding note for user {} on {}", username, date_str);

        self.store
            .update(username, |record| notes::append(record, &date_str, text))
            .await
            .map_err(Self::not_found_or_storage)?
    }

    fn not_found_or_storage(e: StoreError) -> PlannerError {
        match e {
            StoreError::NotFound(username) => PlannerError::RecordNotFound(username),
            other => PlannerError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::store::{StoreConfig, init_store};
    use tempfile::TempDir;

    async fn service(dir: &TempDir) -> AccountService {
        let config = StoreConfig {
            data_dir: dir.path().to_path_buf(),
        };
        let store = init_store(&config, "users.json").await.unwrap();
        AccountService::new(store)
    }

    fn week(day: Weekday, raw: &str) -> BTreeMap<Weekday, String> {
        BTreeMap::from([(day, raw.to_string())])
    }

    #[tokio::test]
    async fn test_register_creates_complete_empty_week() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();

        let record = accounts.find("alice").await.unwrap();
        assert!(record.weekly_schedule.is_complete());
        for day in Weekday::ALL {
            assert!(record.weekly_schedule.items_for(day).is_empty());
        }
        assert!(record.notes.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();

        let err = accounts
            .register("alice", "0ther!pass")
            .await
            .expect_err("second registration succeeded");
        assert!(matches!(err, PlannerError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_verify_credentials_round_trip() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();

        let record = accounts
            .verify_credentials("alice", "Str0ng!pass")
            .await
            .unwrap();
        assert_eq!(record.username, "alice");

        let err = accounts
            .verify_credentials("alice", "wrong")
            .await
            .expect_err("wrong password accepted");
        assert!(matches!(err, PlannerError::Unauthorized));

        let err = accounts
            .verify_credentials("nobody", "Str0ng!pass")
            .await
            .expect_err("unknown user accepted");
        assert!(matches!(err, PlannerError::Unauthorized));
    }

    #[tokio::test]
    async fn test_set_weekly_schedule_parses_and_fills_missing_days() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();

        let record = accounts
            .set_weekly_schedule("alice", &week(Weekday::Sunday, "09:00 - Gym\nRead a book"))
            .await
            .unwrap();

        let sunday = record.weekly_schedule.items_for(Weekday::Sunday);
        assert_eq!(sunday.len(), 2);
        assert_eq!(sunday[0].time, "09:00");
        assert_eq!(sunday[0].text, "Gym");
        assert_eq!(sunday[1].time, "");
        assert_eq!(sunday[1].text, "Read a book");

        assert!(record.weekly_schedule.is_complete());
        assert!(record.weekly_schedule.items_for(Weekday::Monday).is_empty());
    }

    #[tokio::test]
    async fn test_schedule_replace_preserves_notes_added_in_between() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();
        accounts
            .set_weekly_schedule("alice", &week(Weekday::Monday, "08:00 - Standup"))
            .await
            .unwrap();
        accounts
            .add_note("alice", Some("2024-01-08"), "Bring laptop charger")
            .await
            .unwrap();

        let record = accounts
            .set_weekly_schedule("alice", &week(Weekday::Tuesday, "12:00 - Lunch"))
            .await
            .unwrap();

        // Full-map replace: Monday is gone, Tuesday is in
        assert!(record.weekly_schedule.items_for(Weekday::Monday).is_empty());
        assert_eq!(record.weekly_schedule.items_for(Weekday::Tuesday).len(), 1);
        // The note added in between survived the replace
        assert_eq!(record.notes_for("2024-01-08").len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_day_combines_items_and_notes() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();
        accounts
            .set_weekly_schedule("alice", &week(Weekday::Sunday, "09:00 - Gym"))
            .await
            .unwrap();
        let note = accounts
            .add_note("alice", Some("2024-01-07"), "  Call mom  ")
            .await
            .unwrap();
        assert_eq!(note.text, "Call mom");

        // 2024-01-07 is a Sunday
        let day = accounts.resolve_day("alice", "2024-01-07").await.unwrap();
        assert_eq!(day.date, "2024-01-07");
        assert_eq!(day.items.len(), 1);
        assert_eq!(day.items[0].text, "Gym");
        assert_eq!(day.notes.len(), 1);
        assert_eq!(day.notes[0].text, "Call mom");

        // A different Sunday has the recurring item but not the note
        let other_sunday = accounts.resolve_day("alice", "2024-01-14").await.unwrap();
        assert_eq!(other_sunday.items.len(), 1);
        assert!(other_sunday.notes.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_day_rejects_malformed_dates() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        let err = accounts
            .resolve_day("alice", "not-a-date")
            .await
            .expect_err("malformed date accepted");
        assert!(matches!(err, PlannerError::InvalidDate));
    }

    #[tokio::test]
    async fn test_resolve_day_for_unknown_user_is_empty() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        let day = accounts.resolve_day("nobody", "2024-01-07").await.unwrap();
        assert!(day.items.is_empty());
        assert!(day.notes.is_empty());
    }

    #[tokio::test]
    async fn test_add_note_rejects_blank_text_and_unknown_users() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();

        let err = accounts
            .add_note("alice", Some("2024-01-07"), "   ")
            .await
            .expect_err("blank note accepted");
        assert!(matches!(err, PlannerError::BlankText));

        let err = accounts
            .add_note("nobody", Some("2024-01-07"), "hello")
            .await
            .expect_err("note for unknown user accepted");
        assert!(matches!(err, PlannerError::RecordNotFound(_)));

        let err = accounts
            .add_note("alice", Some("not-a-date"), "hello")
            .await
            .expect_err("malformed note date accepted");
        assert!(matches!(err, PlannerError::InvalidDate));
    }

    #[tokio::test]
    async fn test_add_note_defaults_to_current_utc_date() {
        let dir = TempDir::new().unwrap();
        let accounts = service(&dir).await;

        accounts.register("alice", "Str0ng!pass").await.unwrap();
        accounts.add_note("alice", None, "today's note").await.unwrap();

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let record = accounts.find("alice").await.unwrap();
        assert_eq!(record.notes_for(&today).len(), 1);
    }
}

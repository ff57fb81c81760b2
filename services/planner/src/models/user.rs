//! User record model and related functionality

use std::collections::BTreeMap;

use common::store::Record;
use serde::{Deserialize, Serialize};

use super::note::NoteEntry;
use super::schedule::WeeklySchedule;

/// Complete persisted state for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username, immutable once created
    pub username: String,
    /// Opaque credential hash, stored and returned unchanged
    pub password_hash: String,
    /// Recurring weekly schedule with all seven weekday keys present
    pub weekly_schedule: WeeklySchedule,
    /// Date-specific notes: ISO `YYYY-MM-DD` date to ordered note list
    pub notes: BTreeMap<String, Vec<NoteEntry>>,
}

impl UserRecord {
    /// Fresh record with an empty weekly schedule and no notes
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            weekly_schedule: WeeklySchedule::empty(),
            notes: BTreeMap::new(),
        }
    }

    /// Notes for one calendar date, empty if none were created
    pub fn notes_for(&self, date: &str) -> &[NoteEntry] {
        self.notes.get(date).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Record for UserRecord {
    fn key(&self) -> &str {
        &self.username
    }
}

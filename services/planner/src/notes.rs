//! Append-only per-date note handling
//!
//! Notes live inside a user record; persisting the record is the store's
//! job, wired up by the account service.

use chrono::Utc;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{NoteEntry, UserRecord};

/// Append a note to the record's list for one calendar date
///
/// Rejects empty and whitespace-only text. The list for the date is created
/// on first use; lists for other dates are never touched.
pub fn append(record: &mut UserRecord, date_str: &str, text: &str) -> PlannerResult<NoteEntry> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PlannerError::BlankText);
    }

    let entry = NoteEntry {
        text: text.to_string(),
        created: Utc::now(),
    };
    record
        .notes
        .entry(date_str.to_string())
        .or_default()
        .push(entry.clone());

    Ok(entry)
}

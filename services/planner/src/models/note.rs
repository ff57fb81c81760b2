//! Note model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One free-text note tied to a specific calendar date
///
/// Notes are append-only: they are never edited or deleted, only added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Note text, never empty
    pub text: String,
    /// Creation timestamp (UTC)
    pub created: DateTime<Utc>,
}

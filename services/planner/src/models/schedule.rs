//! Weekly schedule model and related functionality

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical weekday identifiers, ordered Sunday-first
///
/// The indexing matches the JS `Date.getDay()` convention: Sunday is 0,
/// Saturday is 6. Clients computing the bucket on their side must agree
/// with [`crate::schedule::weekday_of`] bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in Sunday-first order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Lowercase identifier used in persisted records and request payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

/// One recurring entry in a weekday's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Free-form time label, may be empty
    pub time: String,
    /// Item text, never empty
    pub text: String,
}

/// Recurring weekly schedule: an ordered item list per weekday
///
/// Every weekday key is present after initialization. An update replaces
/// the whole map, never a subset of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Weekday, Vec<ScheduleItem>>);

impl WeeklySchedule {
    /// Schedule with all seven weekdays mapped to empty lists
    pub fn empty() -> Self {
        Self(Weekday::ALL.iter().map(|day| (*day, Vec::new())).collect())
    }

    /// Build from per-day item lists, filling missing weekdays with empty lists
    pub fn from_days(days: BTreeMap<Weekday, Vec<ScheduleItem>>) -> Self {
        let mut schedule = Self::empty();
        for (day, items) in days {
            schedule.0.insert(day, items);
        }
        schedule
    }

    /// Items for one weekday, empty if the key is absent
    pub fn items_for(&self, day: Weekday) -> &[ScheduleItem] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// True when all seven weekday keys are present
    pub fn is_complete(&self) -> bool {
        self.0.len() == Weekday::ALL.len()
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

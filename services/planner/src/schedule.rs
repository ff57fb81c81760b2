//! Pure day-resolution and schedule-text parsing logic
//!
//! Everything in this module is stateless: no I/O, no shared state, no
//! synchronization.

use chrono::{Datelike, NaiveDate};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{ScheduleItem, Weekday};

/// Literal separating the time label from the item text in a schedule line
const TIME_SEPARATOR: &str = " - ";

/// Map a calendar date to its weekday bucket
///
/// Sunday-first indexing (Sunday = 0 through Saturday = 6), derived from the
/// proleptic Gregorian day-of-week so month and year boundaries behave.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    match date.weekday() {
        chrono::Weekday::Sun => Weekday::Sunday,
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
    }
}

/// Parse raw multiline schedule text into ordered schedule items
///
/// Each non-empty trimmed line becomes one item. A line containing `" - "`
/// splits once into a time label and the item text; otherwise the whole
/// line is the text and the time label stays empty. Blank lines are dropped
/// and input order is preserved.
pub fn parse_schedule_text(raw: &str) -> Vec<ScheduleItem> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(TIME_SEPARATOR) {
            Some((time, text)) => ScheduleItem {
                time: time.trim().to_string(),
                text: text.trim().to_string(),
            },
            None => ScheduleItem {
                time: String::new(),
                text: line.to_string(),
            },
        })
        .collect()
}

/// Validate an ISO `YYYY-MM-DD` calendar date string
pub fn validate_date(s: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PlannerError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekday_of_sunday_first_week() {
        // 2024-01-07 through 2024-01-13 is a full Sunday-to-Saturday week
        let expected = [
            ("2024-01-07", Weekday::Sunday),
            ("2024-01-08", Weekday::Monday),
            ("2024-01-09", Weekday::Tuesday),
            ("2024-01-10", Weekday::Wednesday),
            ("2024-01-11", Weekday::Thursday),
            ("2024-01-12", Weekday::Friday),
            ("2024-01-13", Weekday::Saturday),
        ];
        for (s, day) in expected {
            assert_eq!(weekday_of(date(s)), day, "wrong bucket for {s}");
        }
    }

    #[test]
    fn test_weekday_of_month_and_year_boundaries() {
        assert_eq!(weekday_of(date("2023-12-31")), Weekday::Sunday);
        assert_eq!(weekday_of(date("2024-01-01")), Weekday::Monday);
        // Leap day
        assert_eq!(weekday_of(date("2024-02-29")), Weekday::Thursday);
        assert_eq!(weekday_of(date("2000-02-29")), Weekday::Tuesday);
    }

    #[test]
    fn test_parse_schedule_text_splits_on_separator() {
        let items = parse_schedule_text("09:00 - Gym\nRead a book\n\n");
        assert_eq!(
            items,
            vec![
                ScheduleItem {
                    time: "09:00".to_string(),
                    text: "Gym".to_string(),
                },
                ScheduleItem {
                    time: String::new(),
                    text: "Read a book".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_schedule_text_splits_only_once() {
        let items = parse_schedule_text("07:30 - Run - park loop");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].time, "07:30");
        assert_eq!(items[0].text, "Run - park loop");
    }

    #[test]
    fn test_parse_schedule_text_trims_and_drops_blank_lines() {
        let items = parse_schedule_text("  \n\t\n  Walk the dog  \n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].time, "");
        assert_eq!(items[0].text, "Walk the dog");
    }

    #[test]
    fn test_parse_schedule_text_preserves_input_order() {
        let items = parse_schedule_text("b\na\nc");
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_validate_date_accepts_iso_dates() {
        assert_eq!(validate_date("2024-01-07").unwrap(), date("2024-01-07"));
        assert_eq!(validate_date("2024-02-29").unwrap(), date("2024-02-29"));
    }

    #[test]
    fn test_validate_date_rejects_malformed_input() {
        for s in ["not-a-date", "2024-13-01", "2023-02-29", "07/01/2024", ""] {
            assert!(
                matches!(validate_date(s), Err(PlannerError::InvalidDate)),
                "accepted {s:?}"
            );
        }
    }
}

//! Calendar-day helpers.
//!
//! Due dates are calendar days, not instants. Text coming from clients or
//! from older backends may carry a time and an offset
//! (`2026-10-15T00:00:00.000Z`); the date written before the `T` is the day
//! the user picked and is taken as-is, never shifted through a timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Storage and key format for calendar days.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown when a task has no due date.
pub const NO_DATE: &str = "—";

/// Returns today's calendar day in the process's local timezone.
///
/// **Note**: This is an impure function (side effect: system clock).
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a strict `YYYY-MM-DD` string.
fn parse_ymd(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_KEY_FORMAT).ok()
}

/// Parses the many ways a due date shows up into a calendar day.
///
/// Resolution order:
/// 1. `YYYY-MM-DD` as written.
/// 2. `YYYY-MM-DDT...`: the date before the `T`, ignoring time and offset.
/// 3. Other instants (RFC 3339, RFC 2822) converted to the local timezone,
///    then `YYYY/MM/DD` and `MM/DD/YYYY`.
///
/// Returns `None` for blank or unrecognised input.
#[must_use]
pub fn parse_local_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(date) = parse_ymd(text) {
        return Some(date);
    }

    if let Some(date) = text.split_once('T').and_then(|(prefix, _)| parse_ymd(prefix)) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .map(|instant| instant.with_timezone(&Local).date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|datetime| datetime.date())
        })
        .or_else(|| NaiveDate::parse_from_str(text, "%Y/%m/%d").ok())
        .or_else(|| NaiveDate::parse_from_str(text, "%m/%d/%Y").ok())
}

/// Parses an ISO 8601 date or date-time and returns the calendar day it names.
///
/// Stricter than [`parse_local_date`]: only `YYYY-MM-DD` optionally followed
/// by `T`, a time and an optional offset is accepted. The offset is validated
/// but never applied.
#[must_use]
pub fn parse_iso8601_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Some(date) = parse_ymd(text) {
        return Some(date);
    }

    let (prefix, _) = text.split_once('T')?;
    let date = parse_ymd(prefix)?;

    let well_formed = DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").is_ok();

    well_formed.then_some(date)
}

/// Formats a calendar day as its `YYYY-MM-DD` key.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses `text` and returns its `YYYY-MM-DD` key.
#[must_use]
pub fn local_date_key(text: &str) -> Option<String> {
    parse_local_date(text).map(date_key)
}

/// Whole calendar days from `today` until `due`. Negative when `due` is past.
#[must_use]
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Long display form, e.g. `Oct 5, 2026`, or [`NO_DATE`].
#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || NO_DATE.to_string(),
        |date| date.format("%b %-d, %Y").to_string(),
    )
}

/// Short display form used on the timeline, e.g. `Oct 5`.
#[must_use]
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Serde adapter for optional due dates.
///
/// Serializes as `YYYY-MM-DD` and deserializes anything
/// [`parse_local_date`] understands, treating blank strings as absent.
pub mod optional_local_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes an optional date as its key.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_some(&super::date_key(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional date without timezone drift.
    ///
    /// # Errors
    ///
    /// Fails when a non-blank string is not a recognisable date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        match text {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => super::parse_local_date(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {text}"))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

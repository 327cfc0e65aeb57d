//! Booking domain rules: field validation, the interval-overlap predicate,
//! and calendar-week computation.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and the repository layer, which executes the same
//! overlap rule store-side as a parameterized range query.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a booking title in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Fixed page size for every booking listing.
pub const PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Per-field validation messages, keyed by submitted field name.
///
/// All failing fields are collected before the operation is rejected, so a
/// single response carries the complete error set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

// ---------------------------------------------------------------------------
// Time ranges
// ---------------------------------------------------------------------------

/// Closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        debug_assert!(end > start, "TimeRange end must be after start");
        Self { start, end }
    }

    /// Whether this existing interval conflicts with a candidate interval.
    ///
    /// Bounds are inclusive: touching endpoints count as a conflict. An
    /// existing interval conflicts when either of its endpoints falls
    /// inside the candidate, or when it strictly contains the candidate.
    pub fn conflicts_with(&self, candidate: &TimeRange) -> bool {
        let starts_inside = self.start >= candidate.start && self.start <= candidate.end;
        let ends_inside = self.end >= candidate.start && self.end <= candidate.end;
        let contains = self.start < candidate.start && self.end > candidate.end;
        starts_inside || ends_inside || contains
    }
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Raw create/update submission.
///
/// Every field arrives optional so that missing and malformed values are
/// reported together as field errors instead of a body-level rejection.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BookingInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub client_id: Option<DbId>,
}

/// A fully validated submission: exactly the whitelist of fields the
/// lifecycle operations are allowed to persist.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub client_id: DbId,
}

impl BookingDraft {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// Validate a submission, collecting every field error.
///
/// Client *existence* is a store concern and is checked by the caller; the
/// id being present at all is checked here.
pub fn validate_booking(input: &BookingInput) -> Result<BookingDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match input.title.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("title", "The title field is required.");
            None
        }
        Some(t) if t.chars().count() > MAX_TITLE_LENGTH => {
            errors.push(
                "title",
                format!("The title may not be greater than {MAX_TITLE_LENGTH} characters."),
            );
            None
        }
        Some(t) => Some(t.to_string()),
    };

    let start_time = required_timestamp(&mut errors, "start_time", "start time", &input.start_time);
    let end_time = required_timestamp(&mut errors, "end_time", "end time", &input.end_time);

    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end <= start {
            errors.push("end_time", "The end time must be after the start time.");
        }
    }

    if input.client_id.is_none() {
        errors.push("client_id", "The client id field is required.");
    }

    match (title, start_time, end_time, input.client_id) {
        (Some(title), Some(start_time), Some(end_time), Some(client_id)) if errors.is_empty() => {
            Ok(BookingDraft {
                title,
                description: input.description.clone().filter(|d| !d.trim().is_empty()),
                start_time,
                end_time,
                client_id,
            })
        }
        _ => Err(errors),
    }
}

fn required_timestamp(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &Option<String>,
) -> Option<Timestamp> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(field, format!("The {label} field is required."));
            None
        }
        Some(raw) => match parse_datetime(raw) {
            Ok(ts) => Some(ts),
            Err(msg) => {
                errors.push(field, msg);
                None
            }
        },
    }
}

/// Parse a submitted timestamp: RFC 3339 (`2025-08-05T09:00:00Z`) or the
/// form-style `2025-08-05 09:00:00`, which is taken as UTC.
pub fn parse_datetime(raw: &str) -> Result<Timestamp, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(format!("'{raw}' is not a valid timestamp."))
}

// ---------------------------------------------------------------------------
// Calendar weeks
// ---------------------------------------------------------------------------

/// Parse the `week` query parameter: a plain `YYYY-MM-DD` date, or a full
/// RFC 3339 timestamp whose date part is used.
pub fn parse_week_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    Err(format!("Could not parse week date '{raw}'."))
}

/// The Monday 00:00:00 through Sunday 23:59:59 (UTC) window of the week
/// containing `date`. Both bounds are inclusive.
pub fn week_bounds(date: NaiveDate) -> (Timestamp, Timestamp) {
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    let sunday = monday + Days::new(6);
    let start = Utc.from_utc_datetime(&monday.and_hms_opt(0, 0, 0).expect("valid time"));
    let end = Utc.from_utc_datetime(&sunday.and_hms_opt(23, 59, 59).expect("valid time"));
    (start, end)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

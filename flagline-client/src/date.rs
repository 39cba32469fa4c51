//! Date canonicalization for date-scoped flag checks.
//!
//! Callers may hand in text, epoch milliseconds or a chrono value. Everything
//! is turned into a [`CheckDate`] before it is sent, and anything that does not
//! name a real instant becomes [`CheckDate::Invalid`] rather than an error.

use chrono::{
    DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeDelta,
    TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Largest distance from the epoch, in milliseconds, that a check date may have.
pub const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Date-time layouts carrying a numeric offset without a colon (`+0000`).
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Offset-less date-time layouts, read as local time.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A date as supplied by the caller, before canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Date or date-time text.
    Text(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(f64),
    /// An instant.
    Instant(DateTime<Utc>),
    /// A wall-clock date-time, read as local time.
    Local(NaiveDateTime),
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for DateInput {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        Self::EpochMillis(millis as f64)
    }
}

impl From<f64> for DateInput {
    fn from(millis: f64) -> Self {
        Self::EpochMillis(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(instant: DateTime<Tz>) -> Self {
        Self::Instant(instant.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(local: NaiveDateTime) -> Self {
        Self::Local(local)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Local(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<CheckDate> for DateInput {
    fn from(date: CheckDate) -> Self {
        match date {
            CheckDate::Valid(instant) => Self::Instant(instant),
            CheckDate::Invalid => Self::EpochMillis(f64::NAN),
        }
    }
}

/// Canonical date sent with a date-scoped check.
///
/// `Invalid` is forwarded as-is; the service decides what it means.
/// On the wire a valid date is an RFC 3339 UTC string with millisecond
/// precision and an invalid one is `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckDate {
    Valid(DateTime<Utc>),
    Invalid,
}

impl CheckDate {
    /// Canonicalize any supported date input.
    pub fn from_input(input: impl Into<DateInput>) -> Self {
        let instant = match input.into() {
            DateInput::Text(text) => parse_text(&text),
            DateInput::EpochMillis(millis) => from_epoch_millis(millis),
            DateInput::Instant(instant) => Some(instant),
            DateInput::Local(naive) => from_local(naive),
        };

        instant.map_or(Self::Invalid, Self::Valid)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Get the instant, if the date is valid.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(instant) => Some(*instant),
            Self::Invalid => None,
        }
    }

    /// Wire representation; `None` for an invalid date.
    pub fn to_wire(&self) -> Option<String> {
        self.instant()
            .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl fmt::Display for CheckDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_wire() {
            Some(text) => f.write_str(&text),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for CheckDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_wire() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CheckDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        Ok(text.map_or(Self::Invalid, |t| Self::from_input(t)))
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }

    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return from_local(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return from_local(date.and_time(chrono::NaiveTime::MIN));
    }

    parse_year_month(text)
}

/// `YYYY` and `YYYY-MM`: first instant of the period, in UTC.
fn parse_year_month(text: &str) -> Option<DateTime<Utc>> {
    let (year, month) = match text.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (text, None),
    };

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = match month {
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn from_local(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    resolve_local(&Local, naive)
}

/// Resolve a wall-clock time in `tz`.
///
/// Ambiguous times take the earlier instant. Times skipped by a forward
/// transition are read with the offset in force before it, which lands the
/// same distance past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::None => {
            let before = naive.checked_sub_signed(TimeDelta::days(1))?;
            let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
            naive
                .checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
                .map(|utc| utc.and_utc())
        }
        local => local.earliest().map(|dt| dt.with_timezone(&Utc)),
    }
}

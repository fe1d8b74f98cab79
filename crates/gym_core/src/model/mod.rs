//! Domain model for the gym administration core.
//!
//! # Responsibility
//! - Define canonical data structures and status enums used by business
//!   logic and persistence.
//! - Hold write-time validation rules that the schema cannot express.
//!
//! # Invariants
//! - Every entity is identified by a surrogate integer key.
//! - Dates are carried as `chrono` naive types and stored as text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod member;
pub mod payment;
pub mod person;
pub mod phone;
pub mod trainer;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn fmt_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

/// Write-time business rule violation. Raised before any row is written.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A composite registration was submitted with at least one blank field.
    MissingFields { action: &'static str },
    /// A single required field was blank after trimming.
    BlankField {
        action: &'static str,
        field: &'static str,
    },
    /// A date range ends before it starts.
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    /// A time range ends at or before its start.
    EndNotAfterStart { start: NaiveTime, end: NaiveTime },
    /// A payment amount must be strictly positive.
    NonPositiveAmount { amount: f64 },
    /// A numeric field (duration, capacity) must be strictly positive.
    NonPositive { field: &'static str, value: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { action } => write!(f, "{action}: all fields required"),
            Self::BlankField { action, field } => {
                write!(f, "{action}: field `{field}` cannot be blank")
            }
            Self::EndBeforeStart { start, end } => write!(
                f,
                "end date {end} cannot be before start date {start}",
                end = fmt_date(*end),
                start = fmt_date(*start)
            ),
            Self::EndNotAfterStart { start, end } => write!(
                f,
                "end time {end} must be later than start time {start}",
                end = end.format(TIME_FORMAT),
                start = start.format(TIME_FORMAT)
            ),
            Self::NonPositiveAmount { amount } => {
                write!(f, "payment amount must be greater than 0, got {amount}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than 0, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

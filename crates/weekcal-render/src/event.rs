//! Event records submitted for rendering.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// A timed block shown in one day column of the week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Zero-based weekday index, 0 is the first column.
    pub day: i64,
    /// Wall-clock start, `HH:MM` in 24-hour format.
    pub start_time: String,
    /// Wall-clock end, `HH:MM` in 24-hour format.
    pub end_time: String,
    pub title: String,
    /// One of the palette names: red, green, blue or yellow.
    pub color: String,
}

/// Parse a strict `HH:MM` 24-hour wall time.
///
/// Both fields need exactly two digits, so `9:05` and `09:5` are rejected
/// along with out of range values such as `24:00`.
pub fn parse_wall_time(value: &str) -> Result<NaiveTime> {
    let invalid = || RenderError::InvalidTimeFormat {
        value: value.to_owned(),
    };

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let hour = two_digits(hour).ok_or_else(invalid)?;
    let minute = two_digits(minute).ok_or_else(invalid)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn two_digits(field: &str) -> Option<u32> {
    match field.as_bytes() {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => None,
    }
}

/// Position of a wall time within the day, in fractional hours.
pub fn fractional_hours(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

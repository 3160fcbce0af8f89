use crate::error::{Result, SkyviewError};
use chrono::{Duration, NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A contiguous run of rows belonging to one recording session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionBlock {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub start_counter: f64,
    pub end_counter: f64,
}

impl SessionBlock {
    /// Open a block on a single row
    pub fn open(timestamp: &str, counter: f64) -> Self {
        Self {
            start_timestamp: timestamp.to_string(),
            end_timestamp: timestamp.to_string(),
            start_counter: counter,
            end_counter: counter,
        }
    }

    pub fn extend(&mut self, timestamp: &str, counter: f64) {
        self.end_timestamp.clear();
        self.end_timestamp.push_str(timestamp);
        self.end_counter = counter;
    }

    /// Wall-clock length of the block. Date-only timestamps count as midnight.
    pub fn duration(&self) -> Result<Duration> {
        let start = parse_timestamp(&self.start_timestamp)?;
        let end = parse_timestamp(&self.end_timestamp)?;
        Ok(end - start)
    }
}

/// Parse a SkyView timestamp, accepting `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SkyviewError::InvalidTimestamp(value.to_string()))
}

/// Format a duration as `H:MM:SS`, prefixed with `N day(s), ` past 24 hours.
///
/// Days are floored, so only the day count carries a sign and the time of
/// day is always positive: -90 seconds is `-1 day, 23:58:30`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let days = total.div_euclid(86_400);
    let rem = total.rem_euclid(86_400);

    let hours = rem / 3_600;
    let minutes = (rem % 3_600) / 60;
    let seconds = rem % 60;

    match days {
        0 => format!("{hours}:{minutes:02}:{seconds:02}"),
        1 | -1 => format!("{days} day, {hours}:{minutes:02}:{seconds:02}"),
        _ => format!("{days} days, {hours}:{minutes:02}:{seconds:02}"),
    }
}

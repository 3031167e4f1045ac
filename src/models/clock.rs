//! Clock punch times.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Markers that flag a punch as having happened after midnight, written
/// after the time.
const NEXT_DAY_SUFFIXES: [&str; 5] = ["(+1)", "（+1）", "+1", "次日", "next day"];

/// Markers that may also lead the time, as in `次日 1:30`.
const NEXT_DAY_PREFIXES: [&str; 1] = ["次日"];

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when a clock string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised clock time '{input}'")]
pub struct ClockParseError {
    /// The rejected input.
    pub input: String,
}

/// A time-of-day punch, optionally marked as belonging to the following day.
///
/// Accepts `H:mm` or `HH:mm` (a trailing `:ss` is tolerated and dropped),
/// with an optional next-day marker such as `+1` or `次日`.
///
/// # Example
///
/// ```
/// use worktime_engine::models::ClockTime;
///
/// let out: ClockTime = "1:30+1".parse().unwrap();
/// assert!(out.next_day);
/// assert_eq!(out.minutes_from_day_start(), 25 * 60 + 30);
/// assert_eq!(out.to_string(), "01:30+1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    /// The wall-clock time.
    pub time: NaiveTime,
    /// Whether the punch happened after midnight of the following day.
    pub next_day: bool,
}

impl ClockTime {
    /// Creates a same-day punch at `hour:minute`.
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self {
            time,
            next_day: false,
        })
    }

    /// Minutes elapsed since midnight of the record's own date.
    pub fn minutes_from_day_start(&self) -> i64 {
        let minutes = i64::from(self.time.hour()) * 60 + i64::from(self.time.minute());
        if self.next_day {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }

    /// Whether this punch is at or after `threshold` on the record's date.
    pub fn is_at_or_after(&self, threshold: NaiveTime) -> bool {
        self.next_day || self.time >= threshold
    }

    /// Whether this punch is strictly after `threshold` on the record's date.
    pub fn is_after(&self, threshold: NaiveTime) -> bool {
        self.next_day || self.time > threshold
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.time.hour(), self.time.minute())?;
        if self.next_day {
            write!(f, "+1")?;
        }
        Ok(())
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClockParseError {
            input: s.to_string(),
        };

        let mut body = s.trim();
        let mut next_day = false;
        if let Some(rest) = NEXT_DAY_SUFFIXES
            .iter()
            .find_map(|marker| body.strip_suffix(marker))
            .or_else(|| {
                NEXT_DAY_PREFIXES
                    .iter()
                    .find_map(|marker| body.strip_prefix(marker))
            })
        {
            body = rest.trim();
            next_day = true;
        }

        let mut parts = body.split(':');
        let hour: u32 = parts
            .next()
            .map(str::trim)
            .filter(|h| is_digits(h))
            .and_then(|h| h.parse().ok())
            .ok_or_else(err)?;
        let minute_part = parts.next().ok_or_else(err)?.trim();
        if !is_digits(minute_part) || minute_part.len() > 2 {
            return Err(err());
        }
        let minute: u32 = minute_part.parse().map_err(|_| err())?;
        if parts.next().is_some_and(|seconds| !is_digits(seconds.trim())) {
            return Err(err());
        }
        if parts.next().is_some() {
            return Err(err());
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)?;
        Ok(Self { time, next_day })
    }
}

/// Non-empty and ASCII digits only; `str::parse` would also take a sign.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl TryFrom<String> for ClockTime {
    type Error = ClockParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

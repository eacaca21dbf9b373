//! Wall-clock primitives: minute-of-day times and the clock abstraction
//!
//! Tournament times are stored as [`ClockTime`], normalized to zero-padded
//! 24-hour form at ingestion. Ordering on `ClockTime` is `(hour, minute)`,
//! which is exactly the lexicographic order of its `"HH:MM"` rendering.

use chrono::{FixedOffset, Local, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

const MS_PER_MINUTE: i64 = 60 * 1000;

/// A minute of the day, rendered as `"HH:MM"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    /// Truncate a wall-clock time to its minute
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    /// Accepts `"HH:MM"`, `"H:MM"` and 12-hour `"H:MMAM"` / `"H:MM PM"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime { value: s.to_string() };
        let trimmed = s.trim();

        let upper = trimmed.to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(h) || h.len() > 2 || !all_digits(m) || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if !(1..=12).contains(&hour) => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Signed distance from now to a same-day tournament start
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeUntil {
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes: i64,
}

/// Time from `now` until `time` on the same calendar day.
///
/// Negative when `time` has already passed. `total_minutes` is floored, and
/// `hours`/`minutes` split it with floor division so that
/// `hours * 60 + minutes == total_minutes` always holds.
pub fn time_until(time: ClockTime, now: NaiveDateTime) -> TimeUntil {
    let now_time = now.time();
    let now_ms = i64::from(now_time.num_seconds_from_midnight()) * 1000
        + i64::from(now_time.nanosecond() / 1_000_000);
    let target_ms = time.minutes_from_midnight() * MS_PER_MINUTE;

    let total_minutes = (target_ms - now_ms).div_euclid(MS_PER_MINUTE);
    TimeUntil {
        hours: total_minutes.div_euclid(60),
        minutes: total_minutes.rem_euclid(60),
        total_minutes,
    }
}

/// Source of wall-clock time in the schedule's local zone
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock, either in the host's local zone or a fixed offset
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset: Some(offset) }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// A clock stuck at one instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

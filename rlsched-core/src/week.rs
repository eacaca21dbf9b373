//! Week Resolver - bi-weekly A/B rotation
//!
//! The rotation is anchored to a reference date whose week carries a known
//! label. Every 7 days after (or before) the anchor the label flips. Week
//! offsets use floor division so dates before the anchor keep the parity.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Rotation label
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
}

impl Label {
    pub fn other(self) -> Self {
        match self {
            Label::A => Label::B,
            Label::B => Label::A,
        }
    }

    /// Label of the week `weeks` away from a week labelled `self`
    pub fn shifted(self, weeks: i64) -> Self {
        if weeks.rem_euclid(2) == 0 {
            self
        } else {
            self.other()
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::A => f.write_str("A"),
            Label::B => f.write_str("B"),
        }
    }
}

impl FromStr for Label {
    type Err = ScheduleError;

    /// Accepts `A`/`B` in either case, optionally prefixed with `week`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let bare = lower.strip_prefix("week").unwrap_or(&lower).trim();
        match bare {
            "a" => Ok(Label::A),
            "b" => Ok(Label::B),
            _ => Err(ScheduleError::InvalidLabel(s.to_string())),
        }
    }
}

/// Reference point of the rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAnchor {
    pub reference_date: NaiveDate,
    #[serde(rename = "referenceWeek")]
    pub reference_label: Label,
}

impl Default for WeekAnchor {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 11, 21).expect("reference date is valid"),
            reference_label: Label::B,
        }
    }
}

/// Resolved week information for one instant
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekState {
    pub current_week: Label,
    pub last_update: NaiveDate,
    pub next_update: NaiveDate,
    pub calculated_automatically: bool,
    pub week_number: u64,
    pub reference_date: NaiveDate,
    pub reference_week: Label,
}

/// Whole weeks between the anchor's midnight and `now`, floored
pub fn weeks_elapsed(anchor: &WeekAnchor, now: NaiveDateTime) -> i64 {
    let days = now.date().signed_duration_since(anchor.reference_date).num_days();
    let into_day = i64::from(now.time().num_seconds_from_midnight()) * 1000
        + i64::from(now.time().nanosecond() / 1_000_000);
    (days * MS_PER_DAY + into_day).div_euclid(MS_PER_WEEK)
}

/// First Monday strictly after the date of `now`
pub fn next_monday(now: NaiveDateTime) -> NaiveDate {
    let days_ahead = 7 - i64::from(now.weekday().num_days_from_monday());
    now.date() + Duration::days(days_ahead)
}

/// Resolve the rotation label at `now`.
///
/// An override replaces the computed label but leaves every other field
/// computed from the clock.
pub fn resolve_week(anchor: &WeekAnchor, now: NaiveDateTime, override_label: Option<Label>) -> WeekState {
    let weeks = weeks_elapsed(anchor, now);
    let computed = anchor.reference_label.shifted(weeks);

    WeekState {
        current_week: override_label.unwrap_or(computed),
        last_update: now.date(),
        next_update: next_monday(now),
        calculated_automatically: override_label.is_none(),
        week_number: weeks.unsigned_abs(),
        reference_date: anchor.reference_date,
        reference_week: anchor.reference_label,
    }
}

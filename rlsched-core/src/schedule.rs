//! Schedule data - the table of tournaments partitioned by recurrence class

use anyhow::Context;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::day::{day_name, is_weekend, parse_day};
use crate::entry::{RawEntry, ScheduledEntry};
use crate::error::{Result, ScheduleError};
use crate::week::{Label, WeekAnchor};

const WEEKDAY_PATTERNS: &str = "stableWeekdayPatterns";
const WEEKEND_PATTERNS: &str = "weekendStablePatterns";

const BUILTIN_SCHEDULE: &str = include_str!("../data/default_schedule.json");

/// Schedule as exchanged in JSON files and update payloads
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub guaranteed_daily_tournaments: Vec<RawEntry>,
    #[serde(default)]
    pub stable_weekday_patterns: BTreeMap<String, Vec<RawEntry>>,
    #[serde(default)]
    pub weekend_stable_patterns: BTreeMap<String, Vec<RawEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_tracking: Option<WeekTrackingDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTrackingDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_week: Option<String>,
}

/// Validated schedule
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    pub daily: Vec<ScheduledEntry>,
    pub weekday: HashMap<Weekday, Vec<ScheduledEntry>>,
    pub weekend: HashMap<Weekday, Vec<ScheduledEntry>>,
    /// Rotation anchor carried by the document, if any
    pub anchor: Option<WeekAnchor>,
    /// Label pinned by the document's `weekTracking.currentWeek`
    pub pinned_week: Option<Label>,
    pub last_updated: Option<String>,
}

impl Schedule {
    /// Validate a document. Nothing is partially accepted.
    pub fn from_document(doc: ScheduleDocument) -> Result<Self> {
        let daily = convert_entries(doc.guaranteed_daily_tournaments)?;
        let weekday = convert_patterns(doc.stable_weekday_patterns, WEEKDAY_PATTERNS, false)?;
        let weekend = convert_patterns(doc.weekend_stable_patterns, WEEKEND_PATTERNS, true)?;

        let (anchor, pinned_week) = match doc.week_tracking {
            None => (None, None),
            Some(tracking) => {
                let anchor = match (tracking.reference_date, tracking.reference_week) {
                    (None, None) => None,
                    (date, label) => {
                        let default = WeekAnchor::default();
                        Some(WeekAnchor {
                            reference_date: date.unwrap_or(default.reference_date),
                            reference_label: match label {
                                Some(label) => label.parse::<Label>()?,
                                None => default.reference_label,
                            },
                        })
                    }
                };
                let pinned = tracking.current_week.map(|w| w.parse::<Label>()).transpose()?;
                (anchor, pinned)
            }
        };

        Ok(Self {
            daily,
            weekday,
            weekend,
            anchor,
            pinned_week,
            last_updated: doc.last_updated,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ScheduleDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schedule {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid schedule {}", path.display()))
    }

    /// The schedule shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SCHEDULE)
    }

    /// Day-specific entries, empty when the day has no pattern
    pub fn patterns_for(&self, day: Weekday) -> &[ScheduledEntry] {
        let patterns = if is_weekend(day) { &self.weekend } else { &self.weekday };
        patterns.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn entry_count(&self) -> usize {
        self.daily.len()
            + self.weekday.values().map(Vec::len).sum::<usize>()
            + self.weekend.values().map(Vec::len).sum::<usize>()
    }

    /// Normalized document form (times zero-padded, rotations as `varies`)
    pub fn to_document(&self) -> ScheduleDocument {
        let patterns = |map: &HashMap<Weekday, Vec<ScheduledEntry>>| -> BTreeMap<String, Vec<RawEntry>> {
            map.iter()
                .map(|(day, entries)| {
                    (day_name(*day).to_string(), entries.iter().map(RawEntry::from).collect())
                })
                .collect()
        };

        let week_tracking = (self.anchor.is_some() || self.pinned_week.is_some()).then(|| {
            WeekTrackingDocument {
                reference_date: self.anchor.map(|a| a.reference_date),
                reference_week: self.anchor.map(|a| a.reference_label.to_string()),
                current_week: self.pinned_week.map(|w| w.to_string()),
            }
        });

        ScheduleDocument {
            guaranteed_daily_tournaments: self.daily.iter().map(RawEntry::from).collect(),
            stable_weekday_patterns: patterns(&self.weekday),
            weekend_stable_patterns: patterns(&self.weekend),
            week_tracking,
            last_updated: self.last_updated.clone(),
        }
    }
}

fn convert_entries(raw: Vec<RawEntry>) -> Result<Vec<ScheduledEntry>> {
    raw.into_iter().map(ScheduledEntry::try_from).collect()
}

fn convert_patterns(
    raw: BTreeMap<String, Vec<RawEntry>>,
    pattern: &'static str,
    weekend: bool,
) -> Result<HashMap<Weekday, Vec<ScheduledEntry>>> {
    let mut patterns = HashMap::new();
    for (key, entries) in raw {
        let day = match parse_day(&key) {
            Ok(day) if is_weekend(day) == weekend => day,
            _ => return Err(ScheduleError::UnknownPatternDay { pattern, day: key }),
        };
        if patterns.contains_key(&day) {
            return Err(ScheduleError::DuplicatePatternDay { pattern, day: key });
        }
        patterns.insert(day, convert_entries(entries)?);
    }
    Ok(patterns)
}

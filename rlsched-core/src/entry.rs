//! Tournament entries: stored form, document form, and resolved form

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::ClockTime;
use crate::week::Label;

/// Placeholder mode written in documents for rotating entries
pub const VARIES: &str = "varies";

/// Mode chosen for each rotation label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationVariants {
    pub week_a: String,
    pub week_b: String,
}

impl RotationVariants {
    pub fn get(&self, label: Label) -> &str {
        match label {
            Label::A => &self.week_a,
            Label::B => &self.week_b,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeSpec {
    Fixed(String),
    Rotating(RotationVariants),
}

/// A tournament as held by the schedule store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledEntry {
    pub time: ClockTime,
    pub team_size: String,
    pub mode: ModeSpec,
    pub notes: Option<String>,
    pub frequency: Option<String>,
}

/// A concrete tournament, ready to serve
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentEntry {
    pub time: ClockTime,
    pub team_size: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Entry as written in a schedule document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub time: String,
    pub team_size: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_b: Option<String>,
}

impl ScheduledEntry {
    pub fn fixed(time: ClockTime, team_size: &str, mode: &str) -> Self {
        Self {
            time,
            team_size: team_size.to_string(),
            mode: ModeSpec::Fixed(mode.to_string()),
            notes: None,
            frequency: None,
        }
    }

    pub fn rotating(time: ClockTime, team_size: &str, week_a: &str, week_b: &str) -> Self {
        Self {
            time,
            team_size: team_size.to_string(),
            mode: ModeSpec::Rotating(RotationVariants {
                week_a: week_a.to_string(),
                week_b: week_b.to_string(),
            }),
            notes: None,
            frequency: None,
        }
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.mode, ModeSpec::Rotating(_))
    }

    /// Pick the concrete mode for `label`, noting rotating picks
    pub fn resolve(&self, label: Label) -> TournamentEntry {
        let (mode, notes) = match &self.mode {
            ModeSpec::Fixed(mode) => (mode.clone(), self.notes.clone()),
            ModeSpec::Rotating(variants) => {
                let note = format!("Auto-selected for Week {label}");
                let notes = match &self.notes {
                    Some(existing) if !existing.is_empty() => format!("{existing} · {note}"),
                    _ => note,
                };
                (variants.get(label).to_string(), Some(notes))
            }
        };

        TournamentEntry {
            time: self.time,
            team_size: self.team_size.clone(),
            mode,
            notes,
            frequency: self.frequency.clone(),
        }
    }
}

impl TryFrom<RawEntry> for ScheduledEntry {
    type Error = ScheduleError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        let time: ClockTime = raw.time.parse()?;

        let rotating =
            raw.week_a.is_some() || raw.week_b.is_some() || raw.mode.trim().eq_ignore_ascii_case(VARIES);
        let mode = if rotating {
            let missing = |label: char| ScheduleError::MissingRotation {
                time: time.to_string(),
                missing: label,
            };
            ModeSpec::Rotating(RotationVariants {
                week_a: raw.week_a.ok_or_else(|| missing('A'))?,
                week_b: raw.week_b.ok_or_else(|| missing('B'))?,
            })
        } else {
            ModeSpec::Fixed(raw.mode)
        };

        Ok(Self {
            time,
            team_size: raw.team_size,
            mode,
            notes: raw.notes,
            frequency: raw.frequency,
        })
    }
}

impl From<&ScheduledEntry> for RawEntry {
    fn from(entry: &ScheduledEntry) -> Self {
        let (mode, week_a, week_b) = match &entry.mode {
            ModeSpec::Fixed(mode) => (mode.clone(), None, None),
            ModeSpec::Rotating(v) => (VARIES.to_string(), Some(v.week_a.clone()), Some(v.week_b.clone())),
        };
        RawEntry {
            time: entry.time.to_string(),
            team_size: entry.team_size.clone(),
            mode,
            notes: entry.notes.clone(),
            frequency: entry.frequency.clone(),
            week_a,
            week_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fixed_entry_passes_through() {
        let entry = ScheduledEntry::try_from(raw(json!({
            "time": "9:00", "teamSize": "2v2", "mode": "Soccar", "notes": "Open"
        })))
        .unwrap();

        let resolved = entry.resolve(Label::A);
        assert_eq!(resolved.time.to_string(), "09:00");
        assert_eq!(resolved.mode, "Soccar");
        assert_eq!(resolved.notes.as_deref(), Some("Open"));
        assert_eq!(entry.resolve(Label::B), resolved);
    }

    #[test]
    fn test_rotating_entry_picks_one_variant() {
        let entry = ScheduledEntry::try_from(raw(json!({
            "time": "19:00", "teamSize": "3v3", "mode": "varies",
            "weekA": "Hoops", "weekB": "Rumble"
        })))
        .unwrap();
        assert!(entry.is_rotating());

        let a = entry.resolve(Label::A);
        let b = entry.resolve(Label::B);
        assert_eq!(a.mode, "Hoops");
        assert_eq!(b.mode, "Rumble");
        assert_eq!(a.notes.as_deref(), Some("Auto-selected for Week A"));
        assert_eq!(b.notes.as_deref(), Some("Auto-selected for Week B"));
    }

    #[test]
    fn test_rotating_note_appends_to_existing() {
        let mut entry = ScheduledEntry::rotating(ClockTime::new(20, 0).unwrap(), "2v2", "Dropshot", "Snow Day");
        entry.notes = Some("Extra mode".into());
        assert_eq!(
            entry.resolve(Label::B).notes.as_deref(),
            Some("Extra mode · Auto-selected for Week B")
        );
    }

    #[test]
    fn test_varies_without_variants_is_rejected() {
        let err = ScheduledEntry::try_from(raw(json!({
            "time": "19:00", "teamSize": "3v3", "mode": "Varies", "weekA": "Hoops"
        })))
        .unwrap_err();
        assert!(matches!(err, ScheduleError::MissingRotation { missing: 'B', .. }));
    }

    #[test]
    fn test_bad_time_is_rejected() {
        let err = ScheduledEntry::try_from(raw(json!({
            "time": "25:00", "teamSize": "1v1", "mode": "Soccar"
        })))
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTime { .. }));
    }

    #[test]
    fn test_missing_time_fails_to_deserialize() {
        let result = serde_json::from_value::<RawEntry>(json!({ "teamSize": "1v1", "mode": "Soccar" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_round_trip_keeps_rotation() {
        let entry = ScheduledEntry::rotating(ClockTime::new(18, 0).unwrap(), "3v3", "Hoops", "Rumble");
        let raw = RawEntry::from(&entry);
        assert_eq!(raw.mode, VARIES);
        assert_eq!(raw.week_a.as_deref(), Some("Hoops"));
        assert_eq!(ScheduledEntry::try_from(raw).unwrap(), entry);
    }

    #[test]
    fn test_resolved_json_is_camel_case() {
        let entry = ScheduledEntry::fixed(ClockTime::new(13, 0).unwrap(), "3v3", "Soccar");
        let json = serde_json::to_value(entry.resolve(Label::A)).unwrap();
        assert_eq!(json, json!({ "time": "13:00", "teamSize": "3v3", "mode": "Soccar" }));
    }
}

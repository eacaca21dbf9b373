//! Query Service - the operations served to clients
//!
//! Every operation reads the clock once and works on one store snapshot, so
//! the answer is consistent even while an update is swapping the schedule.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::day::{day_name, parse_day};
use crate::entry::{ScheduledEntry, TournamentEntry};
use crate::error::Result;
use crate::filter::{self, Next};
use crate::projector::{project_day, DaySchedule};
use crate::schedule::{Schedule, ScheduleDocument};
use crate::store::{ScheduleStore, Snapshot};
use crate::time::{Clock, ClockTime};
use crate::week::{Label, WeekState};

/// One day's tournaments with week context
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub schedule: DaySchedule,
    pub count: usize,
    pub week_tracking: WeekState,
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReport {
    pub current_time: ClockTime,
    pub upcoming: Vec<TournamentEntry>,
    pub count: usize,
}

/// Every stored entry, resolved for the current week
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub count: usize,
    pub last_updated: Option<String>,
    pub week_tracking: WeekState,
    pub guaranteed_daily_tournaments: Vec<TournamentEntry>,
    pub stable_weekday_patterns: BTreeMap<&'static str, Vec<TournamentEntry>>,
    pub weekend_stable_patterns: BTreeMap<&'static str, Vec<TournamentEntry>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeReport {
    pub mode: String,
    pub tournaments: Vec<TournamentEntry>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub tournaments_loaded: usize,
    pub last_updated: Option<String>,
}

pub struct QueryService {
    store: Arc<ScheduleStore>,
    clock: Arc<dyn Clock>,
}

impl QueryService {
    pub fn new(store: Arc<ScheduleStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn week(&self) -> Result<WeekState> {
        Ok(self.store.snapshot()?.week_at(self.clock.now()))
    }

    pub fn today(&self) -> Result<DayReport> {
        let now = self.clock.now();
        let snapshot = self.store.snapshot()?;
        let mut report = day_report(&snapshot, now.weekday(), now);
        report.date = Some(now.date());
        Ok(report)
    }

    pub fn upcoming(&self) -> Result<UpcomingReport> {
        let now = self.clock.now();
        let snapshot = self.store.snapshot()?;
        let label = snapshot.week_at(now).current_week;
        let today = project_day(&snapshot.schedule, now.weekday(), label);

        let current_time = ClockTime::from_naive(now.time());
        let upcoming = filter::upcoming(&today.tournaments, current_time);
        Ok(UpcomingReport {
            current_time,
            count: upcoming.len(),
            upcoming,
        })
    }

    /// Next tournament today, rolling over to tomorrow's first when today is done
    pub fn next(&self) -> Result<Next> {
        let now = self.clock.now();
        let snapshot = self.store.snapshot()?;
        let label = snapshot.week_at(now).current_week;
        let today = project_day(&snapshot.schedule, now.weekday(), label);

        Ok(match filter::next(&today.tournaments, now) {
            Next::NoMoreToday { .. } => {
                let tomorrow = now + Duration::days(1);
                let label = snapshot.week_at(tomorrow).current_week;
                let first = project_day(&snapshot.schedule, tomorrow.weekday(), label)
                    .tournaments
                    .into_iter()
                    .next();
                Next::NoMoreToday { tomorrow: first }
            }
            other => other,
        })
    }

    /// Schedule for a named day. Unknown names are `NotFound`.
    pub fn by_day(&self, name: &str) -> Result<DayReport> {
        let day = parse_day(name)?;
        let snapshot = self.store.snapshot()?;
        Ok(day_report(&snapshot, day, self.clock.now()))
    }

    /// Case-insensitive mode match over the daily-guaranteed set
    pub fn by_mode(&self, mode: &str) -> Result<ModeReport> {
        let needle = mode.trim().to_lowercase();
        let tournaments: Vec<TournamentEntry> = self
            .daily_only()?
            .into_iter()
            .filter(|t| t.mode.to_lowercase() == needle)
            .collect();
        Ok(ModeReport {
            mode: needle,
            count: tournaments.len(),
            tournaments,
        })
    }

    pub fn daily_only(&self) -> Result<Vec<TournamentEntry>> {
        let snapshot = self.store.snapshot()?;
        let label = snapshot.week_at(self.clock.now()).current_week;
        Ok(resolve_all(&snapshot.schedule.daily, label))
    }

    pub fn all(&self) -> Result<Catalog> {
        let snapshot = self.store.snapshot()?;
        let week = snapshot.week_at(self.clock.now());
        let label = week.current_week;
        let schedule = &snapshot.schedule;

        let resolve_patterns = |patterns: &HashMap<Weekday, Vec<ScheduledEntry>>| {
            patterns
                .iter()
                .map(|(day, entries)| (day_name(*day), resolve_all(entries, label)))
                .collect::<BTreeMap<_, _>>()
        };

        Ok(Catalog {
            count: schedule.entry_count(),
            last_updated: schedule.last_updated.clone(),
            week_tracking: week,
            guaranteed_daily_tournaments: resolve_all(&schedule.daily, label),
            stable_weekday_patterns: resolve_patterns(&schedule.weekday),
            weekend_stable_patterns: resolve_patterns(&schedule.weekend),
        })
    }

    pub fn summary(&self) -> Result<StoreSummary> {
        let snapshot = self.store.snapshot()?;
        Ok(summarize(&snapshot.schedule))
    }

    pub fn set_week_override(&self, label: Label) -> Result<WeekState> {
        self.store.set_week_override(Some(label))?;
        self.week()
    }

    pub fn clear_week_override(&self) -> Result<WeekState> {
        self.store.set_week_override(None)?;
        self.week()
    }

    /// Validate `doc` completely, then replace the store contents with it
    pub fn replace_schedule(&self, doc: ScheduleDocument) -> Result<StoreSummary> {
        let schedule = Schedule::from_document(doc)?;
        let installed = self.store.replace(schedule)?;
        Ok(summarize(&installed))
    }
}

fn day_report(snapshot: &Snapshot, day: Weekday, now: NaiveDateTime) -> DayReport {
    let week = snapshot.week_at(now);
    let schedule = project_day(&snapshot.schedule, day, week.current_week);
    DayReport {
        date: None,
        count: schedule.tournaments.len(),
        schedule,
        week_tracking: week,
        last_updated: snapshot.schedule.last_updated.clone(),
    }
}

fn resolve_all(entries: &[ScheduledEntry], label: Label) -> Vec<TournamentEntry> {
    entries.iter().map(|e| e.resolve(label)).collect()
}

fn summarize(schedule: &Schedule) -> StoreSummary {
    StoreSummary {
        tournaments_loaded: schedule.entry_count(),
        last_updated: schedule.last_updated.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::time::FixedClock;
    use crate::week::WeekAnchor;
    use serde_json::json;

    // 2025-11-19 is a Wednesday in week A of the default rotation, 2025-11-26 in week B
    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn service_at(now: NaiveDateTime) -> QueryService {
        let store = ScheduleStore::new(Schedule::builtin().unwrap(), WeekAnchor::default());
        QueryService::new(Arc::new(store), Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_today_uses_current_weekday_and_week() {
        let today = service_at(at(19, 9, 0)).today().unwrap();
        assert_eq!(today.schedule.day, "wednesday");
        assert_eq!(today.date, Some(NaiveDate::from_ymd_opt(2025, 11, 19).unwrap()));
        assert_eq!(today.week_tracking.current_week, Label::A);
        assert_eq!(today.count, 4);
        let rotated = today.schedule.tournaments.iter().find(|t| t.time.hour() == 19).unwrap();
        assert_eq!(rotated.mode, "Heatseeker");
    }

    #[test]
    fn test_today_is_idempotent() {
        let service = service_at(at(19, 9, 0));
        assert_eq!(service.today().unwrap(), service.today().unwrap());
    }

    #[test]
    fn test_rotation_follows_clock() {
        // Same weekday one week later is week B
        let today = service_at(at(26, 9, 0)).today().unwrap();
        assert_eq!(today.week_tracking.current_week, Label::B);
        let rotated = today.schedule.tournaments.iter().find(|t| t.time.hour() == 19).unwrap();
        assert_eq!(rotated.mode, "Dropshot");
    }

    #[test]
    fn test_upcoming_filters_by_current_time() {
        let report = service_at(at(19, 14, 30)).upcoming().unwrap();
        assert_eq!(report.current_time.to_string(), "14:30");
        let times: Vec<String> = report.upcoming.iter().map(|t| t.time.to_string()).collect();
        assert_eq!(times, ["17:00", "19:00", "21:00"]);
        assert_eq!(report.count, 3);
    }

    #[test]
    fn test_next_returns_first_upcoming() {
        match service_at(at(19, 14, 30)).next().unwrap() {
            Next::Upcoming { tournament, time_until } => {
                assert_eq!(tournament.time.to_string(), "17:00");
                assert_eq!(time_until.hours, 2);
                assert_eq!(time_until.minutes, 30);
                assert_eq!(time_until.total_minutes, 150);
            }
            other => panic!("expected upcoming, got {other:?}"),
        }
    }

    #[test]
    fn test_next_rolls_over_to_tomorrow() {
        match service_at(at(19, 22, 0)).next().unwrap() {
            Next::NoMoreToday { tomorrow: Some(first) } => {
                assert_eq!(first.time.to_string(), "13:00");
            }
            other => panic!("expected rollover, got {other:?}"),
        }
    }

    #[test]
    fn test_next_with_empty_schedule() {
        let store = ScheduleStore::new(Schedule::default(), WeekAnchor::default());
        let service = QueryService::new(Arc::new(store), Arc::new(FixedClock(at(19, 9, 0))));
        assert_eq!(service.next().unwrap(), Next::NoSchedule);
    }

    #[test]
    fn test_by_day_unknown_is_not_found() {
        let err = service_at(at(19, 9, 0)).by_day("funday").unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownDay(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_by_day_valid_but_empty_is_ok() {
        let store = ScheduleStore::new(Schedule::default(), WeekAnchor::default());
        let service = QueryService::new(Arc::new(store), Arc::new(FixedClock(at(19, 9, 0))));
        let report = service.by_day("tuesday").unwrap();
        assert_eq!(report.count, 0);
        assert!(report.date.is_none());
    }

    #[test]
    fn test_by_day_sunday() {
        let report = service_at(at(19, 9, 0)).by_day("Sunday").unwrap();
        assert_eq!(report.schedule.day, "sunday");
        assert_eq!(report.count, 5);
        assert!(report.schedule.tournaments.iter().any(|t| t.mode == "Dropshot"));
    }

    #[test]
    fn test_by_mode_matches_daily_set_case_insensitively() {
        let service = service_at(at(19, 9, 0));
        let report = service.by_mode("SOCCAR").unwrap();
        assert_eq!(report.mode, "soccar");
        assert_eq!(report.count, 3);

        // Hoops only appears in day-specific patterns
        assert_eq!(service.by_mode("hoops").unwrap().count, 0);
    }

    #[test]
    fn test_daily_only_is_verbatim() {
        let daily = service_at(at(19, 9, 0)).daily_only().unwrap();
        let times: Vec<String> = daily.iter().map(|t| t.time.to_string()).collect();
        assert_eq!(times, ["13:00", "17:00", "21:00"]);
        assert_eq!(daily[2].notes.as_deref(), Some("Prime time bracket"));
    }

    #[test]
    fn test_all_lists_every_entry() {
        let catalog = service_at(at(19, 9, 0)).all().unwrap();
        assert_eq!(catalog.count, 13);
        let listed = catalog.guaranteed_daily_tournaments.len()
            + catalog.stable_weekday_patterns.values().map(Vec::len).sum::<usize>()
            + catalog.weekend_stable_patterns.values().map(Vec::len).sum::<usize>();
        assert_eq!(listed, 13);
        assert_eq!(catalog.stable_weekday_patterns["monday"][0].mode, "Hoops");
    }

    #[test]
    fn test_week_override_changes_resolution() {
        let service = service_at(at(19, 9, 0));
        let week = service.set_week_override(Label::B).unwrap();
        assert_eq!(week.current_week, Label::B);
        assert!(!week.calculated_automatically);

        let rotated = service
            .today()
            .unwrap()
            .schedule
            .tournaments
            .into_iter()
            .find(|t| t.time.hour() == 19)
            .unwrap();
        assert_eq!(rotated.mode, "Dropshot");

        let week = service.clear_week_override().unwrap();
        assert_eq!(week.current_week, Label::A);
        assert!(week.calculated_automatically);
    }

    #[test]
    fn test_replace_schedule_swaps_atomically() {
        let service = service_at(at(19, 14, 30));
        let doc: ScheduleDocument = serde_json::from_value(json!({
            "guaranteedDailyTournaments": [
                { "time": "15:00", "teamSize": "3v3", "mode": "Soccar" },
                { "time": "13:00", "teamSize": "3v3", "mode": "Soccar" }
            ],
            "lastUpdated": "2025-11-26T08:00:00Z"
        }))
        .unwrap();

        let summary = service.replace_schedule(doc).unwrap();
        assert_eq!(summary.tournaments_loaded, 2);
        assert_eq!(summary.last_updated.as_deref(), Some("2025-11-26T08:00:00Z"));

        let today = service.today().unwrap();
        assert_eq!(today.count, 2);
        assert_eq!(today.schedule.tournaments[0].time.to_string(), "13:00");
    }

    #[test]
    fn test_invalid_replace_leaves_store_untouched() {
        let service = service_at(at(19, 9, 0));
        let doc: ScheduleDocument = serde_json::from_value(json!({
            "guaranteedDailyTournaments": [
                { "time": "15:00", "teamSize": "3v3", "mode": "Soccar" },
                { "time": "3pm", "teamSize": "3v3", "mode": "Soccar" }
            ]
        }))
        .unwrap();

        let err = service.replace_schedule(doc).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
        assert_eq!(service.summary().unwrap().tournaments_loaded, 13);
    }
}

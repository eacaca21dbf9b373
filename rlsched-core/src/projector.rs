//! Schedule Projector - concrete tournament list for one day

use chrono::Weekday;
use serde::Serialize;

use crate::day::day_name;
use crate::entry::TournamentEntry;
use crate::schedule::Schedule;
use crate::week::Label;

/// Tournaments of one day, sorted by start time
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: &'static str,
    pub week_label: Label,
    pub tournaments: Vec<TournamentEntry>,
}

/// Daily entries plus the day's pattern, rotations resolved with `label`.
///
/// The sort is stable, so entries sharing a time keep daily-first order.
pub fn project_day(schedule: &Schedule, day: Weekday, label: Label) -> DaySchedule {
    let mut tournaments: Vec<TournamentEntry> = schedule
        .daily
        .iter()
        .chain(schedule.patterns_for(day))
        .map(|entry| entry.resolve(label))
        .collect();
    tournaments.sort_by_key(|t| t.time);

    DaySchedule {
        day: day_name(day),
        week_label: label,
        tournaments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ScheduledEntry;
    use crate::time::ClockTime;

    fn t(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    #[test]
    fn test_daily_only_wednesday() {
        let schedule = Schedule {
            daily: vec![ScheduledEntry::fixed(t(13, 0), "3v3", "Soccar")],
            ..Default::default()
        };

        let projected = project_day(&schedule, Weekday::Wed, Label::A);
        assert_eq!(projected.day, "wednesday");
        assert_eq!(projected.tournaments.len(), 1);
        assert_eq!(projected.tournaments[0].time, t(13, 0));
        assert_eq!(projected.tournaments[0].mode, "Soccar");
    }

    #[test]
    fn test_output_sorted_for_every_day() {
        let schedule = Schedule::builtin().unwrap();
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for day in days {
            for label in [Label::A, Label::B] {
                let projected = project_day(&schedule, day, label);
                assert!(!projected.tournaments.is_empty());
                assert!(
                    projected.tournaments.windows(2).all(|w| w[0].time <= w[1].time),
                    "{day} not sorted"
                );
            }
        }
    }

    #[test]
    fn test_rotating_entries_follow_label() {
        let schedule = Schedule::builtin().unwrap();

        let week_a = project_day(&schedule, Weekday::Mon, Label::A);
        let week_b = project_day(&schedule, Weekday::Mon, Label::B);
        let pick = |d: &DaySchedule| {
            d.tournaments
                .iter()
                .find(|x| x.time == t(19, 0))
                .map(|x| x.mode.clone())
                .unwrap()
        };
        assert_eq!(pick(&week_a), "Hoops");
        assert_eq!(pick(&week_b), "Rumble");
        assert!(week_a.tournaments.iter().all(|x| x.mode != "varies"));
    }

    #[test]
    fn test_weekend_uses_weekend_patterns() {
        let schedule = Schedule::builtin().unwrap();
        let saturday = project_day(&schedule, Weekday::Sat, Label::B);
        let times: Vec<String> = saturday.tournaments.iter().map(|x| x.time.to_string()).collect();
        assert_eq!(times, ["10:00", "13:00", "15:00", "17:00", "21:00"]);
        assert_eq!(saturday.tournaments[2].mode, "Heatseeker");
    }

    #[test]
    fn test_empty_schedule_projects_empty() {
        let projected = project_day(&Schedule::default(), Weekday::Tue, Label::A);
        assert!(projected.tournaments.is_empty());
    }
}

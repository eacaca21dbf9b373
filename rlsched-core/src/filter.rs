//! Time Filter - what has started, what is upcoming, what is next

use chrono::NaiveDateTime;

use crate::entry::TournamentEntry;
use crate::time::{time_until, ClockTime, TimeUntil};

/// Outcome of looking for the next tournament
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    Upcoming {
        tournament: TournamentEntry,
        time_until: TimeUntil,
    },
    /// Everything today has started; `tomorrow` is tomorrow's first entry
    /// when the caller rolled over
    NoMoreToday { tomorrow: Option<TournamentEntry> },
    /// The day has nothing scheduled at all
    NoSchedule,
}

/// Entries starting at or after `current`, order preserved
pub fn upcoming(list: &[TournamentEntry], current: ClockTime) -> Vec<TournamentEntry> {
    list.iter().filter(|t| t.time >= current).cloned().collect()
}

/// Split into (already started, upcoming)
pub fn partition(list: &[TournamentEntry], current: ClockTime) -> (Vec<TournamentEntry>, Vec<TournamentEntry>) {
    let (upcoming, past): (Vec<_>, Vec<_>) = list.iter().cloned().partition(|t| t.time >= current);
    (past, upcoming)
}

/// First entry at or after the current minute
pub fn next(list: &[TournamentEntry], now: NaiveDateTime) -> Next {
    if list.is_empty() {
        return Next::NoSchedule;
    }

    let current = ClockTime::from_naive(now.time());
    match list.iter().find(|t| t.time >= current) {
        Some(tournament) => Next::Upcoming {
            tournament: tournament.clone(),
            time_until: time_until(tournament.time, now),
        },
        None => Next::NoMoreToday { tomorrow: None },
    }
}

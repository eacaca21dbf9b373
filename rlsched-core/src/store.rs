//! Schedule Store - owned, swappable schedule state
//!
//! The schedule and the week override sit behind one lock and are replaced
//! as a unit, so a reader never pairs a new schedule with a stale override.

use chrono::NaiveDateTime;
use std::sync::{Arc, RwLock};

use crate::error::{Result, ScheduleError};
use crate::schedule::Schedule;
use crate::week::{resolve_week, Label, WeekAnchor, WeekState};

#[derive(Clone, Debug)]
struct StoreState {
    schedule: Arc<Schedule>,
    week_override: Option<Label>,
}

/// Consistent view of the store for one query
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub schedule: Arc<Schedule>,
    pub week_override: Option<Label>,
    pub anchor: WeekAnchor,
}

impl Snapshot {
    pub fn week_at(&self, now: NaiveDateTime) -> WeekState {
        resolve_week(&self.anchor, now, self.week_override)
    }
}

pub struct ScheduleStore {
    state: RwLock<StoreState>,
    /// Used when the loaded schedule carries no anchor of its own
    default_anchor: WeekAnchor,
}

impl ScheduleStore {
    pub fn new(schedule: Schedule, default_anchor: WeekAnchor) -> Self {
        let week_override = schedule.pinned_week;
        Self {
            state: RwLock::new(StoreState {
                schedule: Arc::new(schedule),
                week_override,
            }),
            default_anchor,
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let state = self.state.read().map_err(|_| ScheduleError::LockPoisoned)?;
        Ok(Snapshot {
            anchor: state.schedule.anchor.unwrap_or(self.default_anchor),
            schedule: Arc::clone(&state.schedule),
            week_override: state.week_override,
        })
    }

    /// Pin (`Some`) or release (`None`) the week label. Last write wins.
    pub fn set_week_override(&self, label: Option<Label>) -> Result<()> {
        let mut state = self.state.write().map_err(|_| ScheduleError::LockPoisoned)?;
        state.week_override = label;
        Ok(())
    }

    /// Swap in a whole new schedule. The override resets to whatever the
    /// new schedule pins.
    pub fn replace(&self, schedule: Schedule) -> Result<Arc<Schedule>> {
        let schedule = Arc::new(schedule);
        let mut state = self.state.write().map_err(|_| ScheduleError::LockPoisoned)?;
        *state = StoreState {
            week_override: schedule.pinned_week,
            schedule: Arc::clone(&schedule),
        };
        Ok(schedule)
    }
}

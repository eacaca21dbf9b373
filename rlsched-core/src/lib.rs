//! RLSched Core - recurring tournament schedule logic
//!
//! This crate provides the schedule model and its queries:
//! - Schedule documents and the validated in-memory schedule
//! - Bi-weekly A/B week rotation anchored to a reference date
//! - Per-day projection with rotating modes resolved
//! - Upcoming/next filtering against the wall clock
//! - The query service consumed by the HTTP server and CLI

pub mod day;
pub mod entry;
pub mod error;
pub mod filter;
pub mod projector;
pub mod query;
pub mod schedule;
pub mod store;
pub mod time;
pub mod week;

// Re-exports for convenient access
pub use day::{day_name, parse_day, DAY_NAMES};
pub use entry::{ModeSpec, RawEntry, RotationVariants, ScheduledEntry, TournamentEntry};
pub use error::{ErrorKind, ScheduleError};
pub use filter::Next;
pub use projector::{project_day, DaySchedule};
pub use query::{Catalog, DayReport, ModeReport, QueryService, StoreSummary, UpcomingReport};
pub use schedule::{Schedule, ScheduleDocument, WeekTrackingDocument};
pub use store::{ScheduleStore, Snapshot};
pub use time::{time_until, Clock, ClockTime, FixedClock, SystemClock, TimeUntil};
pub use week::{resolve_week, Label, WeekAnchor, WeekState};

//! Schedule source options shared by every subcommand
//!
//! Builds the query service from the command line: which schedule to load,
//! how the week rotation is anchored, and which clock to read.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use clap::Args;

use rlsched_core::{Clock, FixedClock, Label, QueryService, Schedule, ScheduleStore, SystemClock, WeekAnchor};

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Schedule document (JSON); the built-in schedule is used when omitted
    #[arg(long, env = "RLSCHED_SCHEDULE", value_name = "FILE")]
    pub schedule: Option<PathBuf>,

    /// A date known to fall in `--reference-week` (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub reference_date: Option<NaiveDate>,

    /// Rotation label of the week containing the reference date
    #[arg(long, value_name = "A|B")]
    pub reference_week: Option<Label>,

    /// Schedule time zone as minutes east of UTC; defaults to the host zone
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

/// Load the schedule and wire it to a clock.
///
/// `at` pins the clock to one instant instead of reading the system time.
pub fn build_query_service(args: &SourceArgs, at: Option<NaiveDateTime>) -> Result<QueryService> {
    let schedule = load_schedule(args)?;
    let clock = build_clock(args.utc_offset, at)?;
    let store = ScheduleStore::new(schedule, WeekAnchor::default());
    Ok(QueryService::new(Arc::new(store), clock))
}

/// Read the schedule file (or the built-in one) and apply anchor overrides
pub fn load_schedule(args: &SourceArgs) -> Result<Schedule> {
    let mut schedule = match &args.schedule {
        Some(path) => {
            let schedule = Schedule::load(path)?;
            tracing::info!(
                "Loaded {} tournaments from {}",
                schedule.entry_count(),
                path.display()
            );
            schedule
        }
        None => {
            tracing::debug!("No schedule file given, using built-in schedule");
            Schedule::builtin().context("built-in schedule is invalid")?
        }
    };

    if args.reference_date.is_some() || args.reference_week.is_some() {
        let base = schedule.anchor.unwrap_or_default();
        schedule.anchor = Some(WeekAnchor {
            reference_date: args.reference_date.unwrap_or(base.reference_date),
            reference_label: args.reference_week.unwrap_or(base.reference_label),
        });
    }

    Ok(schedule)
}

fn build_clock(utc_offset: Option<i32>, at: Option<NaiveDateTime>) -> Result<Arc<dyn Clock>> {
    if let Some(at) = at {
        return Ok(Arc::new(FixedClock(at)));
    }

    match utc_offset {
        Some(minutes) => Ok(Arc::new(SystemClock::with_offset(parse_offset(minutes)?))),
        None => Ok(Arc::new(SystemClock::local())),
    }
}

fn parse_offset(minutes: i32) -> Result<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        anyhow::bail!("UTC offset out of range: {} minutes (max ±{})", minutes, MAX_OFFSET_MINUTES);
    }
    FixedOffset::east_opt(minutes * 60)
        .with_context(|| format!("invalid UTC offset: {} minutes", minutes))
}

/// Parse `--at` values: `YYYY-MM-DDTHH:MM`, optionally with seconds or a space separator
pub fn parse_at(value: &str) -> std::result::Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got {:?}", value))
}

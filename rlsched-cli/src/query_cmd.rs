//! Query commands - print schedule answers without running the server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: execute(), report()
//! - Level 3: print_text() per answer kind
//! - Level 4: formatting utilities

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use serde_json::Value;

use rlsched_core::{DayReport, ModeReport, Next, QueryService, TournamentEntry, UpcomingReport, WeekState};
use rlsched_server::next_body;

use crate::source::{build_query_service, parse_at, SourceArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Answer as of this local time (YYYY-MM-DDTHH:MM) instead of now
    #[arg(long, value_name = "DATETIME", value_parser = parse_at)]
    pub at: Option<NaiveDateTime>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which question to ask the schedule
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Today,
    Upcoming,
    Next,
    Day(String),
    Mode(String),
    Week,
}

/// Answer to one query
#[derive(Clone, Debug)]
enum Answer {
    Day(DayReport),
    Upcoming(UpcomingReport),
    Next(Next),
    Mode(ModeReport),
    Week(WeekState),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run a query command
///
/// 1. Build the query service from the source options
/// 2. Execute the query
/// 3. Report the answer
pub fn run(query: Query, args: QueryArgs) -> Result<()> {
    let service = build_query_service(&args.source, args.at)?;
    tracing::debug!("Running {:?} at {}", query, service.now());

    let answer = execute(&service, &query)?;

    report(answer, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn execute(service: &QueryService, query: &Query) -> Result<Answer> {
    Ok(match query {
        Query::Today => Answer::Day(service.today()?),
        Query::Upcoming => Answer::Upcoming(service.upcoming()?),
        Query::Next => Answer::Next(service.next()?),
        Query::Day(day) => Answer::Day(service.by_day(day)?),
        Query::Mode(mode) => Answer::Mode(service.by_mode(mode)?),
        Query::Week => Answer::Week(service.week()?),
    })
}

fn report(answer: Answer, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(answer)?)?);
    } else {
        print_text(&answer);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn to_json(answer: Answer) -> Result<Value> {
    Ok(match answer {
        Answer::Day(report) => serde_json::to_value(report)?,
        Answer::Upcoming(report) => serde_json::to_value(report)?,
        Answer::Next(next) => next_body(next),
        Answer::Mode(report) => serde_json::to_value(report)?,
        Answer::Week(week) => serde_json::to_value(week)?,
    })
}

fn print_text(answer: &Answer) {
    match answer {
        Answer::Day(report) => {
            let date = report.date.map(|d| format!(" {}", d)).unwrap_or_default();
            println!(
                "\n=== {}{} (week {}) ===",
                report.schedule.day, date, report.schedule.week_label
            );
            print_entries(&report.schedule.tournaments);
        }
        Answer::Upcoming(report) => {
            println!("\n=== Upcoming after {} ===", report.current_time);
            print_entries(&report.upcoming);
        }
        Answer::Next(Next::Upcoming { tournament, time_until }) => {
            println!(
                "Next: {} (in {}h {:02}m)",
                format_entry(tournament),
                time_until.hours,
                time_until.minutes
            );
        }
        Answer::Next(Next::NoMoreToday { tomorrow }) => {
            println!("No more tournaments today");
            if let Some(first) = tomorrow {
                println!("Tomorrow starts with: {}", format_entry(first));
            }
        }
        Answer::Next(Next::NoSchedule) => println!("No tournaments scheduled today"),
        Answer::Mode(report) => {
            println!("\n=== Daily {} tournaments ===", report.mode);
            print_entries(&report.tournaments);
        }
        Answer::Week(week) => {
            for line in format_week(week) {
                println!("{}", line);
            }
        }
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_week(week: &WeekState) -> Vec<String> {
    let source = if week.calculated_automatically { "calculated" } else { "pinned" };
    vec![
        format!("Week {} ({})", week.current_week, source),
        format!("Reference:   {} is week {}", week.reference_date, week.reference_week),
        format!("Weeks since: {}", week.week_number),
        format!("Next update: {}", week.next_update),
    ]
}

fn print_entries(entries: &[TournamentEntry]) {
    if entries.is_empty() {
        println!("(none)");
        return;
    }
    for entry in entries {
        println!("  {}", format_entry(entry));
    }
    println!("Total: {}", entries.len());
}

fn format_entry(entry: &TournamentEntry) -> String {
    let mut line = format!("{}  {:<4} {}", entry.time, entry.team_size, entry.mode);
    if let Some(notes) = &entry.notes {
        line.push_str(&format!("  [{}]", notes));
    }
    line
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn service_at(at: &str) -> QueryService {
        build_query_service(&SourceArgs::default(), Some(parse_at(at).unwrap())).unwrap()
    }

    #[test]
    fn test_execute_day_query() {
        let service = service_at("2025-11-19T09:00");
        match execute(&service, &Query::Day("Saturday".into())).unwrap() {
            Answer::Day(report) => {
                assert_eq!(report.schedule.day, "saturday");
                assert_eq!(report.count, 5);
            }
            other => panic!("expected day answer, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_unknown_day_fails() {
        let service = service_at("2025-11-19T09:00");
        let err = execute(&service, &Query::Day("someday".into())).unwrap_err();
        assert!(err.to_string().contains("unknown day"));
    }

    #[test]
    fn test_next_json_shape() {
        let service = service_at("2025-11-19T16:45");
        let value = to_json(execute(&service, &Query::Next).unwrap()).unwrap();
        assert_eq!(value["tournament"]["time"], "17:00");
        assert_eq!(value["timeUntil"]["totalMinutes"], 15);
    }

    #[test]
    fn test_week_text_shows_refresh_date() {
        let service = service_at("2025-11-24T08:00");
        match execute(&service, &Query::Week).unwrap() {
            Answer::Week(week) => {
                let lines = format_week(&week);
                assert_eq!(lines[0], "Week B (calculated)");
                assert_eq!(lines[1], "Reference:   2025-11-21 is week B");
                assert_eq!(lines[3], "Next update: 2025-12-01");
            }
            other => panic!("expected week answer, got {other:?}"),
        }
    }

    #[test]
    fn test_format_entry_with_notes() {
        let entry = TournamentEntry {
            time: "21:00".parse().unwrap(),
            team_size: "3v3".into(),
            mode: "Soccar".into(),
            notes: Some("Prime time bracket".into()),
            frequency: None,
        };
        assert_eq!(format_entry(&entry), "21:00  3v3  Soccar  [Prime time bracket]");
    }
}

//! Validate command - check a schedule document before deploying it
//!
//! Prints a summary, or with `--normalize` the document as the server would
//! store it (times zero-padded, rotations spelled out).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rlsched_core::{parse_day, Schedule, DAY_NAMES};

#[derive(Args)]
pub struct ValidateArgs {
    /// Schedule document to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the normalized document instead of a summary
    #[arg(long)]
    pub normalize: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let schedule = Schedule::load(&args.file)?;

    if args.normalize {
        let json = serde_json::to_string_pretty(&schedule.to_document())
            .context("Failed to serialize normalized schedule")?;
        println!("{}", json);
        return Ok(());
    }

    for line in summarize(&schedule) {
        println!("{}", line);
    }
    Ok(())
}

fn summarize(schedule: &Schedule) -> Vec<String> {
    let mut lines = vec![format!("OK: {} tournaments", schedule.entry_count())];
    lines.push(format!("  daily:    {}", schedule.daily.len()));

    for name in DAY_NAMES {
        let Ok(day) = parse_day(name) else {
            continue;
        };
        let entries = schedule.patterns_for(day);
        if !entries.is_empty() {
            let rotating = entries.iter().filter(|e| e.is_rotating()).count();
            lines.push(format!("  {:<9} {} ({} rotating)", format!("{}:", name), entries.len(), rotating));
        }
    }

    match schedule.anchor {
        Some(anchor) => lines.push(format!(
            "  anchor:   {} is week {}",
            anchor.reference_date, anchor.reference_label
        )),
        None => lines.push("  anchor:   none (default rotation)".to_string()),
    }
    if let Some(pinned) = schedule.pinned_week {
        lines.push(format!("  pinned:   week {}", pinned));
    }

    lines
}

//! RLSched CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API
//! - today / upcoming / next: Answer schedule questions for the current moment
//! - day / mode: Look up one day or one game mode
//! - week: Show the current rotation week
//! - validate: Check a schedule document

mod query_cmd;
mod server;
mod source;
mod validate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use query_cmd::{Query, QueryArgs};

#[derive(Parser)]
#[command(name = "rlsched")]
#[command(about = "Recurring tournament schedule server and query tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Today's tournaments
    Today(QueryArgs),
    /// Today's tournaments that have not started yet
    Upcoming(QueryArgs),
    /// The next tournament, rolling over to tomorrow when today is done
    Next(QueryArgs),
    /// Tournaments for a named day
    Day {
        /// Full day name, e.g. "friday"
        day: String,
        #[command(flatten)]
        args: QueryArgs,
    },
    /// Daily tournaments of one game mode
    Mode {
        /// Mode name, matched case-insensitively
        mode: String,
        #[command(flatten)]
        args: QueryArgs,
    },
    /// Current rotation week
    Week(QueryArgs),
    /// Validate a schedule document
    Validate(validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Today(args) => query_cmd::run(Query::Today, args),
        Commands::Upcoming(args) => query_cmd::run(Query::Upcoming, args),
        Commands::Next(args) => query_cmd::run(Query::Next, args),
        Commands::Day { day, args } => query_cmd::run(Query::Day(day), args),
        Commands::Mode { mode, args } => query_cmd::run(Query::Mode(mode), args),
        Commands::Week(args) => query_cmd::run(Query::Week, args),
        Commands::Validate(args) => validate::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_day_command() {
        let cli = Cli::parse_from(["rlsched", "day", "friday", "--at", "2025-11-21T18:00", "--json"]);
        match cli.command {
            Commands::Day { day, args } => {
                assert_eq!(day, "friday");
                assert!(args.json);
                assert!(args.at.is_some());
            }
            _ => panic!("expected day command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["rlsched", "serve", "--port", "8080", "--utc-offset", "-300"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.source.utc_offset, Some(-300));
                assert!(args.cors_origins.is_empty());
            }
            _ => panic!("expected serve command"),
        }
    }
}

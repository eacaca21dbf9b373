//! Example to run the schedule server standalone with the built-in schedule
//!
//! Run with: cargo run -p rlsched-server --example run_server

use rlsched_core::{QueryService, Schedule, ScheduleStore, SystemClock, WeekAnchor};
use rlsched_server::{run_server, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let store = ScheduleStore::new(Schedule::builtin()?, WeekAnchor::default());
    let query = QueryService::new(Arc::new(store), Arc::new(SystemClock::local()));

    let config = ServerConfig::default();
    println!("Starting schedule server on port {}", config.port);
    println!("Open http://localhost:{}/api/tournaments/today", config.port);

    run_server(config, query).await
}

//! Server command - start the schedule HTTP API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to rlsched-server crate)
//! - Level 4: configuration validation

use std::net::IpAddr;

use anyhow::Result;
use clap::Args;

use rlsched_core::QueryService;
use rlsched_server::{run_server, ServerConfig};

use crate::source::{build_query_service, SourceArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Allowed CORS origin (repeatable); any origin when omitted
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server and load the schedule
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;
    let query = build_query_service(&args.source, None)?;

    tracing::info!("Starting schedule server on {}", config.addr());

    start_server(config, query)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_port(args.port)?;
    validate_origins(&args.cors_origins)?;

    Ok(ServerConfig {
        host: args.host,
        port: args.port,
        cors_origins: args.cors_origins.clone(),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig, query: QueryService) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config, query).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        anyhow::bail!("Port must be non-zero");
    }
    if port < 1024 {
        tracing::warn!("Port {} is privileged and may require elevated permissions", port);
    }
    Ok(())
}

/// Origins must be absolute http(s) URLs
fn validate_origins(origins: &[String]) -> Result<()> {
    for origin in origins {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            anyhow::bail!("CORS origin must start with http:// or https://: {}", origin);
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

//! RLSched Server - HTTP API for the tournament schedule
//!
//! This crate provides the web backend:
//! - REST API over the query service (today, upcoming, next, by day/mode)
//! - Week rotation override endpoints
//! - Whole-schedule ingestion endpoint
//! - Health check and JSON 404 fallback

mod error;
mod routes;
mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use rlsched_core::QueryService;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use routes::status::{AVAILABLE_ENDPOINTS, SERVICE_NAME};
pub use routes::tournaments::next_body;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(allowed)
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::status::health_handler))
        // Tournament queries
        .route("/api/tournaments", get(routes::tournaments::get_all))
        .route("/api/tournaments/today", get(routes::tournaments::get_today))
        .route("/api/tournaments/upcoming", get(routes::tournaments::get_upcoming))
        .route("/api/tournaments/next", get(routes::tournaments::get_next))
        .route("/api/tournaments/daily", get(routes::tournaments::get_daily))
        .route("/api/tournaments/day/:day", get(routes::tournaments::get_by_day))
        .route("/api/tournaments/mode/:mode", get(routes::tournaments::get_by_mode))
        // Ingestion
        .route("/api/tournaments/update", post(routes::update::update_schedule))
        // Week rotation
        .route(
            "/api/week",
            get(routes::week::get_week)
                .post(routes::week::set_week)
                .delete(routes::week::clear_week),
        )
        // Shared state
        .with_state(state)
        .fallback(routes::status::not_found)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig, query: QueryService) -> anyhow::Result<()> {
    let addr = config.addr();
    let summary = query.summary()?;
    let state = Arc::new(ServerState::new(query));
    let router = create_router(&config, state);

    tracing::info!("{} starting on http://{}", SERVICE_NAME, addr);
    tracing::info!("Serving {} scheduled tournaments", summary.tournaments_loaded);
    for endpoint in AVAILABLE_ENDPOINTS {
        tracing::debug!("  {}", endpoint);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert!(config.cors_origins.is_empty());
    }
}

//! Server state management
//!
//! The query service owns the schedule store; handlers only borrow it.

use rlsched_core::QueryService;

/// Server-wide shared state
pub struct ServerState {
    pub query: QueryService,
}

impl ServerState {
    pub fn new(query: QueryService) -> Self {
        Self { query }
    }
}

//! HTTP route handlers

pub mod status;
pub mod tournaments;
pub mod update;
pub mod week;

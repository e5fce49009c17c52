//! Shared types, configuration, and error taxonomy for the minyan server.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;

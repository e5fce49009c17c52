//! HTTP application layer for the minyan server.

pub mod app;
pub mod config;
pub mod error;
pub mod gateway_handler;
pub mod store_handler;

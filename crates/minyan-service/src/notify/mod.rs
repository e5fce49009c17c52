//! Outbound messaging collaborators. Single best-effort calls, no retry or
//! backoff anywhere; failures are reported to the caller and nothing else.

pub mod push;
pub mod whatsapp;

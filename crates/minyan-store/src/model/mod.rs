//! Typed models for the stored document collections.
//!
//! Bodies serialize with camelCase field names, the store's wire format.
//! Models never carry their own document id; reads pair them with the id via
//! [`crate::document::Stored`].

pub mod announcement;
pub mod attendance;
pub mod building;
pub mod event;
pub mod recurrence;
pub mod user;

//! Document-store abstraction and typed models for the minyan server.
//!
//! The core of the application depends only on the [`store::DocumentStore`]
//! capability set (keyed CRUD, filtered queries, atomic batches, live query
//! subscriptions), never on a concrete engine. The store handle is always an
//! explicitly constructed client passed into each service, so tests run
//! against [`store::memory::MemoryStore`] without any global state.

pub mod document;
pub mod error;
pub mod model;
pub mod query;
pub mod serial;
pub mod store;

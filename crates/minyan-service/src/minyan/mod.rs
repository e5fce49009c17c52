//! The scheduling core: recurrence materialization, live attendance
//! aggregation, the quorum policy, and series lifecycle.

pub mod attendance;
pub mod events;
pub mod lifecycle;
pub mod materializer;
pub mod quorum;

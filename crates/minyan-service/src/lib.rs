//! Domain services for the minyan server: recurrence materialization,
//! live attendance aggregation, quorum policy, series lifecycle, building
//! membership, announcements, and the outbound messaging gateways.

pub mod announcement;
pub mod building;
pub mod error;
pub mod minyan;
pub mod notify;
pub mod user;

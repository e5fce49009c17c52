//! Integration tests for the minyan scheduling server.

mod announcements;
mod attendance;
mod buildings;
mod helpers;
mod quorum_flow;
mod recurrences;

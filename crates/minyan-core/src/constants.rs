/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

/// Number of confirmed attendees that make a minyan.
pub const MINYAN_THRESHOLD: u32 = 10;

/// Length of generated building invite codes.
pub const INVITE_CODE_LEN: usize = 6;

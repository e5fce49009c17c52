//! Minyan scheduling server - integration test support.
//!
//! This crate re-exports the workspace crates to support integration tests
//! that use `minyan::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    // Re-export core and service modules at the component level
    pub use minyan_core::*;
    pub use minyan_service::*;

    // Re-export the store crate with its public modules
    pub mod store {
        pub use minyan_store::store::*;

        pub mod memory {
            pub use minyan_store::store::memory::*;
        }
    }

    // Re-export models and queries
    pub mod model {
        pub use minyan_store::model::*;
    }

    pub mod query {
        pub use minyan_store::query::*;
    }

    // Re-export config from both core and app
    pub mod config {
        pub use minyan_app::config::ConfigHandler;
        pub use minyan_core::config::*;
    }
}

// Re-export top-level modules for convenience
pub mod app {
    pub use minyan_app::*;

    pub mod api {
        pub use minyan_app::app::api::*;
    }
}

//! Web layer for the roster demo: configuration, HTML rendering, and the
//! axum router with its per-session controller map.

pub mod config;
pub mod render;
pub mod routes;

pub use routes::{build_router, AppState};

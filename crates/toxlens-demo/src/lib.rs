//! ToxLens Demo
//!
//! The web application around the explanation engine: an axum JSON API,
//! an embedded single-page UI, and a small CLI. All prediction artifacts
//! load once at startup and are shared read-only across requests.

pub mod cli;
pub mod models;
pub mod server;
pub mod state;

pub use cli::*;
pub use models::*;
pub use server::*;
pub use state::*;

//! Startup configuration and wiring.
//!
//! - [`config`] - Client configuration from the environment
//! - [`preflight`] - Identity loading and controller construction

pub mod config;
pub mod preflight;

pub use config::ClientConfig;
pub use preflight::{identity_store, prepare, prepare_with};

//! Chatline - a streaming chat client for SSE chat backends
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod auth;
pub mod backend;
pub mod error;
pub mod models;
pub mod sse;
pub mod startup;
pub mod stream;
pub mod traits;

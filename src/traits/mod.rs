//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming)
//! - [`IdentityStore`] - User id and access token storage

pub mod http;
pub mod identity;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use identity::{IdentityError, IdentityStore};

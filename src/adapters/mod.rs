//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileIdentityStore`] - JSON file identity storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses and body streams
//! - [`mock::InMemoryIdentityStore`] - In-memory identity storage

pub mod file_identity;
pub mod mock;
pub mod reqwest_http;

pub use file_identity::FileIdentityStore;
pub use mock::{InMemoryIdentityStore, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;

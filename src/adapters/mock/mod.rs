//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and streams
//! - [`InMemoryIdentityStore`] - In-memory identity storage

pub mod http;
pub mod identity;

pub use http::{MockHttpClient, MockResponse, RecordedRequest, StreamFeeder};
pub use identity::InMemoryIdentityStore;

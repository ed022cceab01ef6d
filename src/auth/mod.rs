//! Client identity: user id and optional access token.

pub mod identity;

pub use identity::{load_or_create, set_token, Identity};

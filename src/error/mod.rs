//! Error handling for the chat client.
//!
//! Each layer has its own error type and [`ChatError`] unifies them:
//!
//! | Type | Raised by | Category |
//! |------|-----------|----------|
//! | [`ConfigError`] | startup configuration | Configuration |
//! | [`StreamError`] | stream sessions | Network / Protocol |
//! | [`ServiceError`] | create, list and history calls | Service / Network |
//! | [`IdentityError`] | identity storage | System |

mod category;
mod chat_error;
mod config;
mod result;
mod service;
mod stream;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use config::ConfigError;
pub use result::ChatResult;
pub use service::ServiceError;
pub use stream::StreamError;

pub use crate::traits::IdentityError;

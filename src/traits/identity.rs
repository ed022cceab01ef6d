//! Identity store trait abstraction.
//!
//! The user id and access token live behind [`IdentityStore`] so the
//! controller never reads global state and tests can swap in memory storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Identity;

/// Identity storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Failed to load the stored identity
    #[error("Failed to load identity: {0}")]
    LoadFailed(String),
    /// Failed to persist the identity
    #[error("Failed to save identity: {0}")]
    SaveFailed(String),
    /// No location to store the identity in
    #[error("No identity location: {0}")]
    NoLocation(String),
    /// Stored identity is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for identity storage and retrieval.
///
/// # Example
///
/// ```ignore
/// use chatline::traits::IdentityStore;
///
/// async fn current_user<S: IdentityStore>(store: &S) -> Option<String> {
///     store.load().await.ok().flatten().map(|identity| identity.user_id)
/// }
/// ```
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Load the stored identity.
    ///
    /// # Returns
    /// - `Ok(Some(identity))` if an identity is stored
    /// - `Ok(None)` if nothing is stored yet
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Identity>, IdentityError>;

    /// Persist the identity, replacing whatever was stored.
    async fn save(&self, identity: &Identity) -> Result<(), IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_display() {
        assert_eq!(
            IdentityError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load identity: read error"
        );
        assert_eq!(
            IdentityError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save identity: disk full"
        );
        assert!(IdentityError::Serialization("eof".to_string())
            .to_string()
            .contains("eof"));
    }
}

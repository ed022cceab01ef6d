//! Client identity for the chat backend.
//!
//! The backend keys sessions by an opaque user id. When none is stored yet a
//! random one is generated and persisted, so the same history comes back on
//! the next run.

use serde::{Deserialize, Serialize};

use crate::traits::{IdentityError, IdentityStore};

/// Identity sent with every backend request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user id chosen by the client.
    pub user_id: String,
    /// Bearer token for the send endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Identity {
    /// Create an identity without a token.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: None,
        }
    }

    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Builder-style token setter.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Check if the identity carries a non-empty access token.
    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Load the stored identity, creating and saving one if none exists.
///
/// A stored identity with an empty user id is treated as missing.
pub async fn load_or_create<S>(store: &S) -> Result<Identity, IdentityError>
where
    S: IdentityStore + ?Sized,
{
    if let Some(identity) = store.load().await? {
        if !identity.user_id.is_empty() {
            tracing::debug!(user_id = %identity.user_id, "Loaded stored identity");
            return Ok(identity);
        }
    }

    let identity = Identity::generate();
    store.save(&identity).await?;
    tracing::info!(user_id = %identity.user_id, "Created new identity");
    Ok(identity)
}

/// Replace the access token and persist the change.
///
/// Nothing is written when the token is unchanged.
pub async fn set_token<S>(
    store: &S,
    identity: &mut Identity,
    token: Option<String>,
) -> Result<(), IdentityError>
where
    S: IdentityStore + ?Sized,
{
    if identity.access_token == token {
        return Ok(());
    }
    identity.access_token = token;
    store.save(identity).await
}

//! In-memory identity store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Identity;
use crate::traits::{IdentityError, IdentityStore};

/// In-memory identity store for testing.
///
/// Stores the identity in memory and counts writes, so tests can check that
/// an identity is persisted exactly when expected.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    /// Stored identity
    identity: Arc<Mutex<Option<Identity>>>,
    /// Number of successful saves
    saves: Arc<Mutex<usize>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial identity.
    pub fn with_identity(identity: Identity) -> Self {
        let store = Self::new();
        store.set_identity(Some(identity));
        store
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the stored identity synchronously.
    pub fn get_identity(&self) -> Option<Identity> {
        self.identity.lock().unwrap().clone()
    }

    /// Set the stored identity synchronously. Does not count as a save.
    pub fn set_identity(&self, identity: Option<Identity>) {
        *self.identity.lock().unwrap() = identity;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn load(&self) -> Result<Option<Identity>, IdentityError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(IdentityError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.get_identity())
    }

    async fn save(&self, identity: &Identity) -> Result<(), IdentityError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(IdentityError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_identity(Some(identity.clone()));
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

//! Startup wiring: identity, HTTP client and controller.

use std::sync::Arc;

use super::config::ClientConfig;
use crate::adapters::{FileIdentityStore, ReqwestHttpClient};
use crate::app::ChatApp;
use crate::auth::load_or_create;
use crate::backend::BackendClient;
use crate::error::ChatResult;
use crate::traits::{HttpClient, IdentityStore};

/// Build the identity store the config points at.
pub fn identity_store(config: &ClientConfig) -> ChatResult<FileIdentityStore> {
    match &config.identity_path {
        Some(path) => Ok(FileIdentityStore::at(path)),
        None => Ok(FileIdentityStore::new()?),
    }
}

/// Load the identity and build a controller from injected adapters.
pub async fn prepare_with(
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn IdentityStore>,
) -> ChatResult<ChatApp> {
    let identity = load_or_create(store.as_ref()).await?;
    tracing::info!(
        backend = %config.backend_url,
        user_id = %identity.user_id,
        has_token = identity.has_token(),
        "Client ready"
    );

    let backend = BackendClient::new(config, http);
    Ok(ChatApp::new(backend, identity, store))
}

/// Build a controller with the file identity store and reqwest client.
pub async fn prepare(config: ClientConfig) -> ChatResult<ChatApp> {
    let store = identity_store(&config)?;
    tracing::debug!(path = %store.path().display(), "Using identity file");
    prepare_with(config, Arc::new(ReqwestHttpClient::new()), Arc::new(store)).await
}

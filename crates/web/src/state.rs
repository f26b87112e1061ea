//! Application state shared across handlers.

use std::sync::Arc;

use storebuilder_core::StorefrontEnv;

use crate::backend::{BackendClient, BackendError};
use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds configuration and the backend client;
/// no per-tenant data is kept here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: WebConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, backend }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the backend REST client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Environment used to build canonical storefront URLs.
    #[must_use]
    pub fn storefront_env(&self) -> &StorefrontEnv {
        &self.inner.config.storefront_env
    }
}

//! Session-stored operator credential.
//!
//! The session is the console's credential store: written on login, read by
//! the gate on every gated console request, flushed on logout.

use storebuilder_core::{Credential, CredentialStore};
use tower_sessions::Session;

/// Session keys for console authentication data.
pub mod keys {
    /// Key for the credential issued by the backend on login.
    pub const CREDENTIAL: &str = "credential";
}

/// Snapshot of the credential held by one session.
#[derive(Debug, Clone, Default)]
pub struct SessionCredential(Option<Credential>);

impl SessionCredential {
    /// Read the credential from the session.
    ///
    /// A value that no longer deserializes counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        match session.get::<Credential>(keys::CREDENTIAL).await {
            Ok(credential) => Ok(Self(credential)),
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable session credential");
                Ok(Self(None))
            }
            Err(e) => Err(e),
        }
    }

    /// Store a credential in the session.
    ///
    /// The session id is cycled so a pre-login id cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn store(
        session: &Session,
        credential: &Credential,
    ) -> Result<(), tower_sessions::session::Error> {
        session.cycle_id().await?;
        session.insert(keys::CREDENTIAL, credential).await
    }

    /// Remove the credential and everything else in the session (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be flushed.
    pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.flush().await
    }
}

impl CredentialStore for SessionCredential {
    fn credential(&self) -> Option<&Credential> {
        self.0.as_ref()
    }
}

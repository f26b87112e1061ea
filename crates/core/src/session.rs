//! Console credentials and the session gate.
//!
//! The gate decides whether a console view may render locally. It does not
//! validate the token: the backend does that on every authorized request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Credential issued by the backend on login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token for console-authenticated backend endpoints.
    pub token: String,
    /// Backend id of the operator.
    pub user_id: UserId,
    /// First name shown in the console greeting.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Credential {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Read access to wherever the current visitor's credential is kept.
pub trait CredentialStore {
    /// The stored credential, if any.
    fn credential(&self) -> Option<&Credential>;
}

impl CredentialStore for Option<Credential> {
    fn credential(&self) -> Option<&Credential> {
        self.as_ref()
    }
}

/// State of a session gate.
///
/// `Checking` moves to one of the other two exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// The credential store has not been consulted yet.
    Checking,
    /// A credential with a non-empty token was present.
    Authenticated(Credential),
    /// No usable credential.
    Unauthenticated,
}

impl GateState {
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Checking)
    }
}

/// Gate guarding a single console view mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGate {
    state: GateState,
}

impl SessionGate {
    /// A gate that has not checked yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GateState::Checking,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GateState {
        &self.state
    }

    /// Consult the store and settle the gate.
    ///
    /// Only the first call reads the store; later calls return the settled
    /// state unchanged.
    pub fn check(&mut self, store: &impl CredentialStore) -> &GateState {
        if !self.state.is_settled() {
            self.state = match store.credential().filter(|c| c.has_token()) {
                Some(credential) => GateState::Authenticated(credential.clone()),
                None => GateState::Unauthenticated,
            };
        }
        &self.state
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

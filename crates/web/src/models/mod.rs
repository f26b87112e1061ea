//! Types the web layer keeps in the visitor's session.

pub mod session;

pub use session::{SessionCredential, keys as session_keys};

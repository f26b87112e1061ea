//! Client for the StoreBuilder REST backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local copies, no cache
//! - Tenant-scoped reads are public; console reads and writes carry the
//!   operator's bearer token from the session credential
//! - Every failure is a [`BackendError`]; callers decide whether it blocks
//!   the page or degrades a single facet
//!
//! # Example
//!
//! ```rust,ignore
//! use storebuilder_web::backend::{BackendClient, StorefrontBackend};
//!
//! let client = BackendClient::new(&config.backend)?;
//! let products = client.products(&TenantSlug::new("acme")).await?;
//! ```

mod client;

pub use client::{BackendClient, LoginSession, NewStore, SignupRequest};

use serde::de::DeserializeOwned;
use serde_json::Value;
use storebuilder_core::{Banner, Category, Product, ProductId, StoreIdentity, TenantSlug};
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status and no message.
    #[error("Backend returned status {0}")]
    Status(reqwest::StatusCode),

    /// Response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response JSON lacked a required field.
    #[error("Response missing field: {0}")]
    MissingField(&'static str),

    /// Backend reported `success: false` with a message for the user.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Configured base URL cannot carry a path.
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),
}

impl BackendError {
    /// Message safe to show the operator, when the backend supplied one.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Tenant-scoped reads a storefront page is composed from.
///
/// Implemented by [`BackendClient`]; tests substitute in-memory fakes.
pub trait StorefrontBackend: Send + Sync {
    /// `GET /api/store/domain/{slug}`
    fn store_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> impl Future<Output = Result<StoreIdentity, BackendError>> + Send;

    /// `GET /api/categories/store/{slug}`
    fn categories(
        &self,
        slug: &TenantSlug,
    ) -> impl Future<Output = Result<Vec<Category>, BackendError>> + Send;

    /// `GET /api/banners/store/{slug}`
    fn banners(
        &self,
        slug: &TenantSlug,
    ) -> impl Future<Output = Result<Vec<Banner>, BackendError>> + Send;

    /// `GET /api/products/store/{slug}`
    fn products(
        &self,
        slug: &TenantSlug,
    ) -> impl Future<Output = Result<Vec<Product>, BackendError>> + Send;

    /// `GET /api/products/store/{slug}/{product_id}`
    fn product(
        &self,
        slug: &TenantSlug,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, BackendError>> + Send;
}

/// Pull `field` out of a backend JSON envelope.
///
/// Envelopes with `"success": false` become [`BackendError::Rejected`];
/// a missing or `null` field becomes [`BackendError::MissingField`].
pub(crate) fn extract<T: DeserializeOwned>(
    body: &str,
    field: &'static str,
) -> Result<T, BackendError> {
    let mut envelope: Value = serde_json::from_str(body)?;

    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(BackendError::Rejected(rejection_message(&envelope)));
    }

    let value = envelope
        .get_mut(field)
        .map(Value::take)
        .filter(|value| !value.is_null())
        .ok_or(BackendError::MissingField(field))?;

    Ok(serde_json::from_value(value)?)
}

/// Check a write envelope for `"success": true`.
pub(crate) fn expect_success(body: &str) -> Result<(), BackendError> {
    let envelope: Value = serde_json::from_str(body)?;

    match envelope.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(()),
        Some(false) => Err(BackendError::Rejected(rejection_message(&envelope))),
        None => Err(BackendError::MissingField("success")),
    }
}

/// The `message` of an error envelope, if the body is one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let envelope: Value = serde_json::from_str(body).ok()?;
    envelope
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

fn rejection_message(envelope: &Value) -> String {
    envelope
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or("Request was not successful")
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_list() {
        let categories: Vec<Category> = extract(
            r#"{"success":true,"categories":[{"_id":"c1","name":"Toys"},{"_id":"c2","name":"Books"}]}"#,
            "categories",
        )
        .unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Books");
    }

    #[test]
    fn test_extract_store_without_success_flag() {
        let store: StoreIdentity =
            extract(r#"{"store":{"name":"Acme","domain":"acme"}}"#, "store").unwrap();
        assert_eq!(store.name, "Acme");
    }

    #[test]
    fn test_extract_rejected() {
        let err = extract::<Vec<Product>>(
            r#"{"success":false,"message":"Store not found"}"#,
            "products",
        )
        .unwrap_err();
        assert!(matches!(err, BackendError::Rejected(ref m) if m == "Store not found"));
        assert_eq!(err.user_message(), Some("Store not found"));
    }

    #[test]
    fn test_extract_missing_or_null_field() {
        let err = extract::<StoreIdentity>(r#"{"store":null}"#, "store").unwrap_err();
        assert!(matches!(err, BackendError::MissingField("store")));

        let err = extract::<Vec<Banner>>(r#"{"success":true}"#, "banners").unwrap_err();
        assert!(matches!(err, BackendError::MissingField("banners")));
    }

    #[test]
    fn test_extract_malformed() {
        let err = extract::<Vec<Banner>>("<html>oops</html>", "banners").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));

        let err = extract::<Vec<Banner>>(r#"{"banners":{"not":"a list"}}"#, "banners").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
        assert_eq!(err.user_message(), None);
    }

    #[test]
    fn test_expect_success() {
        assert!(expect_success(r#"{"success":true,"message":"ok"}"#).is_ok());
        let err = expect_success(r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Rejected: Request was not successful");
        assert!(matches!(
            expect_success("{}").unwrap_err(),
            BackendError::MissingField("success")
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(error_message("Bad Gateway"), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
    }
}

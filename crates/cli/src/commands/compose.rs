//! `sb-cli compose` - compose a storefront against a live backend.

use std::time::Duration;

use storebuilder_core::TenantSlug;
use storebuilder_web::{backend::BackendClient, compose::compose, config::BackendConfig};
use thiserror::Error;
use url::Url;

/// Errors that can occur while composing from the CLI.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Backend client error: {0}")]
    Backend(#[from] storebuilder_web::backend::BackendError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compose the storefront of `slug` and print the view as JSON.
#[allow(clippy::print_stdout)]
pub async fn run(
    slug: &str,
    api_url: &str,
    timeout_secs: u64,
    fallback_name: &str,
) -> Result<(), ComposeError> {
    let client = BackendClient::new(&BackendConfig {
        base_url: Url::parse(api_url)?,
        request_timeout: Duration::from_secs(timeout_secs),
    })?;

    let view = compose(&client, &TenantSlug::new(slug), fallback_name).await;
    tracing::info!(tenant = slug, status = %view.status, "Composed");

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

//! `reqwest` implementation of the backend client.

use std::sync::Arc;

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use storebuilder_core::{
    Banner, Category, Product, ProductId, StoreIdentity, TenantSlug, TrialStatus, UserId,
};
use tracing::{debug, instrument};
use url::Url;

use super::{BackendError, StorefrontBackend, error_message, expect_success, extract};
use crate::config::BackendConfig;

/// Client for the StoreBuilder REST backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

/// Result of a successful login.
pub struct LoginSession {
    pub token: SecretString,
    pub user_id: UserId,
    pub first_name: Option<String>,
}

/// Fields of the signup form sent to the backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub website_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

/// Fields of a new store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStore {
    pub name: String,
    pub domain: String,
    pub logo_url: String,
}

#[derive(Deserialize)]
struct LoginUser {
    id: UserId,
    #[serde(default, rename = "firstName")]
    first_name: Option<String>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// cannot carry path segments.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl(config.base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(error_message(&body).map_or(
                BackendError::Status(status),
                BackendError::Rejected,
            ));
        }

        Ok(body)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        field: &'static str,
        token: Option<&SecretString>,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "Backend GET");

        let mut request = self.inner.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        let body = self.send(request).await?;
        extract(&body, field)
    }

    // =========================================================================
    // Console lookups
    // =========================================================================

    /// Store owned by a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn store_by_user(&self, user_id: &UserId) -> Result<StoreIdentity, BackendError> {
        self.get_json(&["api", "store", "user", user_id.as_str()], "store", None)
            .await
    }

    /// Trial/plan status of a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn trial_status(&self, user_id: &UserId) -> Result<TrialStatus, BackendError> {
        let url = self.endpoint(&["api", "auth", "check-trial", user_id.as_str()])?;
        let body = self.send(self.inner.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Operator's products.
    #[instrument(skip(self, token))]
    pub async fn owner_products(&self, token: &SecretString) -> Result<Vec<Product>, BackendError> {
        self.get_json(&["api", "products"], "products", Some(token))
            .await
    }

    /// Operator's categories.
    #[instrument(skip(self, token))]
    pub async fn owner_categories(
        &self,
        token: &SecretString,
    ) -> Result<Vec<Category>, BackendError> {
        self.get_json(&["api", "categories"], "categories", Some(token))
            .await
    }

    /// Operator's banners.
    #[instrument(skip(self, token))]
    pub async fn owner_banners(&self, token: &SecretString) -> Result<Vec<Banner>, BackendError> {
        self.get_json(&["api", "banners"], "banners", Some(token))
            .await
    }

    // =========================================================================
    // Auth and writes
    // =========================================================================

    /// Exchange email and password for a bearer token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginSession, BackendError> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        let payload = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let body = self.send(self.inner.client.post(url).json(&payload)).await?;

        let token: String = extract(&body, "token")?;
        if token.is_empty() {
            return Err(BackendError::MissingField("token"));
        }
        let user: LoginUser = extract(&body, "user")?;

        Ok(LoginSession {
            token: SecretString::from(token),
            user_id: user.id,
            first_name: user.first_name.filter(|name| !name.trim().is_empty()),
        })
    }

    /// Register a new operator account.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), BackendError> {
        let url = self.endpoint(&["api", "auth", "signup"])?;
        let body = self.send(self.inner.client.post(url).json(request)).await?;
        expect_success(&body)
    }

    /// Create the operator's store.
    #[instrument(skip(self, token), fields(store = %store.name))]
    pub async fn create_store(
        &self,
        token: &SecretString,
        store: &NewStore,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&["api", "store", "create"])?;
        let request = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(store);
        let body = self.send(request).await?;
        expect_success(&body)
    }

    /// Check that the backend answers at all.
    ///
    /// Any HTTP response counts; only transport failures are errors.
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await?;
        Ok(())
    }
}

impl StorefrontBackend for BackendClient {
    #[instrument(skip(self), fields(tenant = %slug))]
    async fn store_by_slug(&self, slug: &TenantSlug) -> Result<StoreIdentity, BackendError> {
        self.get_json(&["api", "store", "domain", slug.as_str()], "store", None)
            .await
    }

    #[instrument(skip(self), fields(tenant = %slug))]
    async fn categories(&self, slug: &TenantSlug) -> Result<Vec<Category>, BackendError> {
        self.get_json(
            &["api", "categories", "store", slug.as_str()],
            "categories",
            None,
        )
        .await
    }

    #[instrument(skip(self), fields(tenant = %slug))]
    async fn banners(&self, slug: &TenantSlug) -> Result<Vec<Banner>, BackendError> {
        self.get_json(&["api", "banners", "store", slug.as_str()], "banners", None)
            .await
    }

    #[instrument(skip(self), fields(tenant = %slug))]
    async fn products(&self, slug: &TenantSlug) -> Result<Vec<Product>, BackendError> {
        self.get_json(
            &["api", "products", "store", slug.as_str()],
            "products",
            None,
        )
        .await
    }

    #[instrument(skip(self), fields(tenant = %slug, product_id = %id))]
    async fn product(&self, slug: &TenantSlug, id: &ProductId) -> Result<Product, BackendError> {
        self.get_json(
            &["api", "products", "store", slug.as_str(), id.as_str()],
            "product",
            None,
        )
        .await
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

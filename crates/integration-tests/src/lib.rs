//! Integration tests for StoreBuilder.
//!
//! Each test drives the real router (`storebuilder_web::app`) with the real
//! `reqwest` backend client pointed at a `wiremock` server standing in for
//! the REST backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storebuilder-integration-tests
//! ```

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storebuilder_web::{app, config::WebConfig, state::AppState};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// A running app wired to a mock backend.
pub struct TestContext {
    pub backend: MockServer,
    pub app: Router,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

impl TestContext {
    /// Start a mock backend and build the app against it.
    ///
    /// # Panics
    ///
    /// Panics if the configuration or state cannot be built.
    pub async fn new() -> Self {
        let backend = MockServer::start().await;
        let api_url = backend.uri();

        let config = WebConfig::from_lookup(|key| match key {
            "STOREBUILDER_API_URL" => Some(api_url.clone()),
            "STOREBUILDER_REQUEST_TIMEOUT_SECS" => Some("2".to_string()),
            "STOREBUILDER_DEV_SUFFIX" => Some(".localhost:5173".to_string()),
            _ => None,
        })
        .expect("test configuration");

        let app = app(AppState::new(config).expect("test state"));
        Self { backend, app }
    }

    /// Answer `GET {route}` on the mock backend with a JSON body.
    pub async fn mock_get(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.backend)
            .await;
    }

    /// Answer `POST {route}` on the mock backend with a JSON body.
    pub async fn mock_post(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.backend)
            .await;
    }

    /// Mock all four storefront facets of `slug` as successful.
    pub async fn mock_storefront(&self, slug: &str) {
        self.mock_get(
            &format!("/api/store/domain/{slug}"),
            200,
            json!({ "store": { "name": "Acme Toys", "domain": slug } }),
        )
        .await;
        self.mock_get(
            &format!("/api/categories/store/{slug}"),
            200,
            json!({ "success": true, "categories": [{ "_id": "c1", "name": "Trains" }] }),
        )
        .await;
        self.mock_get(
            &format!("/api/banners/store/{slug}"),
            200,
            json!({ "success": true, "banners": [{ "_id": "b1", "title": "Summer Sale" }] }),
        )
        .await;
        self.mock_get(
            &format!("/api/products/store/{slug}"),
            200,
            json!({ "success": true, "products": [
                { "_id": "p2", "name": "Paper Kite", "price": 199 },
                { "_id": "p1", "name": "Wooden Train", "price": 499, "mrp": 699 }
            ]}),
        )
        .await;
    }

    /// Send a request through the app.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: &str,
        host: &str,
        uri: &str,
        cookie: Option<&str>,
        form: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, host);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("infallible");

        TestResponse::collect(response).await
    }

    /// `GET` without a session.
    pub async fn get(&self, host: &str, uri: &str) -> TestResponse {
        self.send("GET", host, uri, None, None).await
    }

    /// Log in through `/login` and return the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if login does not redirect with a session cookie.
    pub async fn login(&self, user_id: &str, token: &str) -> String {
        self.mock_post(
            "/api/auth/login",
            200,
            json!({
                "success": true,
                "token": token,
                "user": { "id": user_id, "firstName": "Priya" }
            }),
        )
        .await;

        let response = self
            .send(
                "POST",
                "localhost:5173",
                "/login",
                None,
                Some("email=priya%40example.com&password=secret1"),
            )
            .await;
        assert_eq!(response.location.as_deref(), Some("/dashboard"));
        response.cookie.expect("session cookie")
    }
}

impl TestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let status = response.status();
        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let location = header_text(header::LOCATION);
        let cookie = header_text(header::SET_COOKIE)
            .and_then(|cookie| cookie.split(';').next().map(str::to_string));

        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();

        Self {
            status,
            location,
            cookie,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

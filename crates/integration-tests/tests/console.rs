//! Console host: session gate, login flow and dashboard.

use serde_json::json;
use storebuilder_integration_tests::TestContext;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

const CONSOLE: &str = "localhost:5173";

#[tokio::test]
async fn test_gated_routes_redirect_anonymous_visitors() {
    let ctx = TestContext::new().await;

    for path in [
        "/dashboard",
        "/products",
        "/categories",
        "/banners",
        "/create-store",
        "/upgrade",
        "/demo",
        "/product/p1",
    ] {
        let response = ctx.get(CONSOLE, path).await;
        assert_eq!(response.status, 303, "{path}");
        assert_eq!(response.location.as_deref(), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_open_routes() {
    let ctx = TestContext::new().await;

    for path in ["/", "/login", "/signup"] {
        assert_eq!(ctx.get(CONSOLE, path).await.status, 200, "{path}");
    }
    assert_eq!(ctx.get(CONSOLE, "/no-such-page").await.status, 404);
}

#[tokio::test]
async fn test_landing_links_work_without_session() {
    let ctx = TestContext::new().await;
    let landing = ctx.get(CONSOLE, "/").await;

    for href in ["/signup", "/login"] {
        assert!(landing.body.contains(&format!("href=\"{href}\"")), "{href}");
        assert_eq!(ctx.get(CONSOLE, href).await.status, 200, "{href}");
    }
    assert!(!landing.body.contains("href=\"/demo\""));
}

#[tokio::test]
async fn test_login_then_dashboard() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u1", "jwt-abc").await;

    ctx.mock_get(
        "/api/auth/check-trial/u1",
        200,
        json!({ "plan": "trial", "daysLeft": 5 }),
    )
    .await;
    ctx.mock_get(
        "/api/store/user/u1",
        200,
        json!({ "store": { "name": "Acme Toys", "domain": "https://acme.localhost:5173/" } }),
    )
    .await;

    let response = ctx
        .send("GET", CONSOLE, "/dashboard", Some(&cookie), None)
        .await;

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Priya"));
    assert!(response.body.contains("Acme Toys"));
    assert!(response.body.contains("http://acme.localhost:5173"));
    assert!(response.body.contains("View acme"));
    assert!(response.body.contains("free trial"));
}

#[tokio::test]
async fn test_dashboard_without_store_links_demo() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u2", "jwt-def").await;

    ctx.mock_get(
        "/api/auth/check-trial/u2",
        200,
        json!({ "plan": "premium" }),
    )
    .await;
    ctx.mock_get(
        "/api/store/user/u2",
        404,
        json!({ "message": "No store found" }),
    )
    .await;

    let response = ctx
        .send("GET", CONSOLE, "/dashboard", Some(&cookie), None)
        .await;

    assert_eq!(response.status, 200);
    assert!(response.body.contains("My Store"));
    assert!(response.body.contains("http://localhost:5173/demo"));
    assert!(response.body.contains("View Website"));
    assert!(response.body.contains("Premium Plan"));
}

#[tokio::test]
async fn test_expired_trial_redirects_to_upgrade() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u3", "jwt-ghi").await;

    ctx.mock_get(
        "/api/auth/check-trial/u3",
        200,
        json!({ "plan": "expired", "daysLeft": 0 }),
    )
    .await;

    let response = ctx
        .send("GET", CONSOLE, "/dashboard", Some(&cookie), None)
        .await;

    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/upgrade"));
}

#[tokio::test]
async fn test_login_rejected_shows_message() {
    let ctx = TestContext::new().await;
    ctx.mock_post(
        "/api/auth/login",
        200,
        json!({ "success": false, "message": "Invalid credentials." }),
    )
    .await;

    let response = ctx
        .send(
            "POST",
            CONSOLE,
            "/login",
            None,
            Some("email=priya%40example.com&password=wrong1"),
        )
        .await;

    assert_eq!(response.status, 401);
    assert!(response.body.contains("Invalid credentials."));
    assert!(response.body.contains("priya@example.com"));
}

#[tokio::test]
async fn test_login_requires_all_fields() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send("POST", CONSOLE, "/login", None, Some("email=&password="))
        .await;

    assert_eq!(response.status, 400);
    assert!(response.body.contains("All fields are required."));
}

#[tokio::test]
async fn test_owner_listings_send_bearer_token() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u1", "jwt-abc").await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [{ "_id": "p1", "name": "Wooden Train", "price": 499 }]
        })))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    let response = ctx
        .send("GET", CONSOLE, "/products", Some(&cookie), None)
        .await;

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Wooden Train"));
    assert!(response.body.contains("₹499"));
}

#[tokio::test]
async fn test_create_store_derives_domain() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u1", "jwt-abc").await;

    Mock::given(method("POST"))
        .and(path("/api/store/create"))
        .and(header("authorization", "Bearer jwt-abc"))
        .and(wiremock::matchers::body_partial_json(json!({
            "name": "Acme Toys",
            "domain": "acmetoys"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
        )
        .expect(1)
        .mount(&ctx.backend)
        .await;

    let response = ctx
        .send(
            "POST",
            CONSOLE,
            "/create-store",
            Some(&cookie),
            Some("name=Acme+Toys&domain=&logo_url="),
        )
        .await;

    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/dashboard"));
}

#[tokio::test]
async fn test_logout_closes_gate() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login("u1", "jwt-abc").await;

    let response = ctx
        .send("POST", CONSOLE, "/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = ctx
        .send("GET", CONSOLE, "/dashboard", Some(&cookie), None)
        .await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_signup_flow() {
    let ctx = TestContext::new().await;
    ctx.mock_post("/api/auth/signup", 200, json!({ "success": true }))
        .await;

    let form = "website_name=Acme&first_name=Priya&last_name=Shah\
                &email=priya%40example.com&password=secret1&confirm_password=secret1";
    let response = ctx.send("POST", CONSOLE, "/signup", None, Some(form)).await;

    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/login?success=signup"));

    let form = "website_name=Acme&first_name=Priya&last_name=Shah\
                &email=priya%40example.com&password=secret1&confirm_password=secret2";
    let response = ctx.send("POST", CONSOLE, "/signup", None, Some(form)).await;
    assert_eq!(response.status, 400);
    assert!(response.body.contains("Passwords do not match."));
}

#[tokio::test]
async fn test_demo_composes_demo_tenant() {
    let ctx = TestContext::new().await;
    ctx.mock_storefront("demo").await;
    let cookie = ctx.login("u1", "jwt-abc").await;

    let response = ctx.send("GET", CONSOLE, "/demo", Some(&cookie), None).await;

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Demo storefront"));
    assert!(response.body.contains("Wooden Train"));
}

//! HTTP route handlers.
//!
//! # Route Structure
//!
//! The dispatcher picks one of two route sets per request.
//!
//! ```text
//! # Storefront hosts (acme.example.com, acme.localhost)
//! GET  /                  - Storefront home (composed view)
//! GET  /product/{id}      - Product detail
//!
//! # Console host (localhost, root domain)
//! GET  /                  - Landing page
//! GET  /signup            - Signup page
//! POST /signup            - Signup action
//! GET  /login             - Login page
//! POST /login             - Login action
//!
//! # Console, behind the session gate
//! POST /logout            - Logout action
//! GET  /dashboard         - Trial status and live store link
//! GET  /products          - Operator's products
//! GET  /categories        - Operator's categories
//! GET  /banners           - Operator's banners
//! GET  /create-store      - Create store page
//! POST /create-store      - Create store action
//! GET  /upgrade           - Trial ended page
//! GET  /demo              - Demo storefront
//! GET  /product/{id}      - Demo product detail
//! ```
//!
//! `/health` and `/health/ready` are mounted outside the dispatcher.

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod pages;
pub mod storefront;
pub mod stores;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::middleware::session_gate;
use crate::state::AppState;

/// Routes served on tenant storefront hosts.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(storefront::home))
        .route("/product/{id}", get(storefront::product))
        .fallback(storefront::not_found)
}

/// Routes served on the console host.
pub fn console_routes() -> Router<AppState> {
    let gated = Router::new()
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::show))
        .route("/products", get(catalog::products))
        .route("/categories", get(catalog::categories))
        .route("/banners", get(catalog::banners))
        .route(
            "/create-store",
            get(stores::create_page).post(stores::create),
        )
        .route("/upgrade", get(pages::upgrade))
        .route("/demo", get(pages::demo))
        .route("/product/{id}", get(pages::demo_product))
        .route_layer(from_fn(session_gate));

    Router::new()
        .route("/", get(pages::landing))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .merge(gated)
        .fallback(pages::not_found)
}

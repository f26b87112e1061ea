//! Static console pages and the console demo storefront.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storebuilder_core::ProductId;

use super::storefront::{StorefrontTemplate, product_page, storefront_page};
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "console/landing.html")]
pub struct LandingTemplate;

/// Trial ended page template.
#[derive(Template, WebTemplate)]
#[template(path = "console/upgrade.html")]
pub struct UpgradeTemplate;

/// Console 404 template.
#[derive(Template, WebTemplate)]
#[template(path = "console/not_found.html")]
pub struct NotFoundTemplate;

/// Display the landing page.
pub async fn landing() -> LandingTemplate {
    LandingTemplate
}

/// Display the trial ended page.
pub async fn upgrade() -> UpgradeTemplate {
    UpgradeTemplate
}

/// Display the demo storefront.
pub async fn demo(State(state): State<AppState>) -> StorefrontTemplate {
    let tenant = state.config().demo_tenant.clone();
    storefront_page(&state, &tenant, true).await
}

/// Display a product of the demo storefront.
pub async fn demo_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let tenant = state.config().demo_tenant.clone();
    product_page(&state, &tenant, &ProductId::new(id), true).await
}

/// Unknown console path.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate).into_response()
}

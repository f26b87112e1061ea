//! Storefront route handlers.
//!
//! Every handler here receives the tenant slug the dispatcher resolved from
//! the host. Backend failures degrade the page; they never turn into errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storebuilder_core::{Product, ProductId, StoreIdentity, StorefrontView, TenantSlug};

use crate::compose::{compose, compose_product};
use crate::state::AppState;

/// Storefront home page template.
#[derive(Template, WebTemplate)]
#[template(path = "storefront/home.html")]
pub struct StorefrontTemplate {
    pub view: StorefrontView,
    /// Rendered inside the console demo rather than on a tenant host.
    pub demo: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "storefront/product.html")]
pub struct ProductTemplate {
    pub store: StoreIdentity,
    pub product: Option<Product>,
    pub demo: bool,
}

/// Storefront 404 template.
#[derive(Template, WebTemplate)]
#[template(path = "storefront/not_found.html")]
pub struct StorefrontNotFoundTemplate {
    pub slug: String,
}

/// Display the storefront home page.
pub async fn home(
    State(state): State<AppState>,
    Extension(slug): Extension<TenantSlug>,
) -> StorefrontTemplate {
    storefront_page(&state, &slug, false).await
}

/// Display a product detail page.
pub async fn product(
    State(state): State<AppState>,
    Extension(slug): Extension<TenantSlug>,
    Path(id): Path<String>,
) -> Response {
    product_page(&state, &slug, &ProductId::new(id), false).await
}

/// Unknown path on a storefront host.
pub async fn not_found(Extension(slug): Extension<TenantSlug>) -> Response {
    (
        StatusCode::NOT_FOUND,
        StorefrontNotFoundTemplate {
            slug: slug.to_string(),
        },
    )
        .into_response()
}

/// Compose and render a storefront for `slug`.
pub(crate) async fn storefront_page(
    state: &AppState,
    slug: &TenantSlug,
    demo: bool,
) -> StorefrontTemplate {
    let view = compose(
        state.backend(),
        slug,
        &state.config().storefront_fallback_name,
    )
    .await;

    if view.is_degraded() {
        tracing::info!(tenant = %slug, status = %view.status, "Serving degraded storefront");
    }

    StorefrontTemplate { view, demo }
}

/// Render a product page, answering 404 when the product is unavailable.
pub(crate) async fn product_page(
    state: &AppState,
    slug: &TenantSlug,
    id: &ProductId,
    demo: bool,
) -> Response {
    let page = compose_product(
        state.backend(),
        slug,
        id,
        &state.config().storefront_fallback_name,
    )
    .await;

    let status = if page.product.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    let template = ProductTemplate {
        store: page.store,
        product: page.product,
        demo,
    };

    (status, template).into_response()
}

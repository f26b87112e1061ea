//! Storefront composition.
//!
//! Pulls the four facets of a storefront concurrently and folds them into a
//! [`StorefrontView`]. A failed facet is logged and replaced by its fallback;
//! it never fails the page.

use storebuilder_core::{Facet, Product, ProductId, StoreIdentity, StorefrontView, TenantSlug};
use tracing::instrument;

use crate::backend::{BackendError, StorefrontBackend};

/// Compose the storefront view for a tenant.
///
/// All four fetches are issued together and awaited jointly. Nothing is
/// cached: every call hits the backend again.
#[instrument(skip(backend, fallback_name), fields(tenant = %slug))]
pub async fn compose<B: StorefrontBackend>(
    backend: &B,
    slug: &TenantSlug,
    fallback_name: &str,
) -> StorefrontView {
    let (store, categories, banners, products) = tokio::join!(
        backend.store_by_slug(slug),
        backend.categories(slug),
        backend.banners(slug),
        backend.products(slug),
    );

    let view = StorefrontView::assemble(
        settle(slug, Facet::Store, store),
        settle(slug, Facet::Categories, categories),
        settle(slug, Facet::Banners, banners),
        settle(slug, Facet::Products, products),
        fallback_name,
    );

    tracing::debug!(
        status = %view.status,
        products = view.products.len(),
        failed = ?view.facets.failed(),
        "Composed storefront"
    );

    view
}

/// A product page: the store identity plus one product.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub store: StoreIdentity,
    /// `None` when the product could not be loaded.
    pub product: Option<Product>,
}

/// Fetch the store identity and a single product concurrently.
#[instrument(skip(backend, fallback_name), fields(tenant = %slug, product_id = %id))]
pub async fn compose_product<B: StorefrontBackend>(
    backend: &B,
    slug: &TenantSlug,
    id: &ProductId,
    fallback_name: &str,
) -> ProductPage {
    let (store, product) = tokio::join!(backend.store_by_slug(slug), backend.product(slug, id));

    let store = settle(slug, Facet::Store, store).map_or_else(
        || StoreIdentity::fallback(fallback_name),
        |store| store.or_fallback_name(fallback_name),
    );

    ProductPage {
        store,
        product: settle(slug, Facet::Products, product),
    }
}

/// Turn a facet fetch into "present or absent", logging the failure.
fn settle<T>(slug: &TenantSlug, facet: Facet, result: Result<T, BackendError>) -> Option<T> {
    result
        .inspect_err(|e| {
            tracing::warn!(tenant = %slug, facet = %facet, error = %e, "Storefront facet unavailable");
        })
        .ok()
}

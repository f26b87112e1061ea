//! Storefront view-model.
//!
//! A storefront page is built from four independent facets: the store
//! identity, categories, banners and products. Each facet either arrives or
//! is replaced by its fallback, and the aggregate status records how much of
//! the page is real data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Banner, Category, ComposeStatus, Product, StoreIdentity};

/// One of the four data sources composed into a storefront view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Store,
    Categories,
    Banners,
    Products,
}

impl Facet {
    pub const ALL: [Self; 4] = [Self::Store, Self::Categories, Self::Banners, Self::Products];
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => write!(f, "store"),
            Self::Categories => write!(f, "categories"),
            Self::Banners => write!(f, "banners"),
            Self::Products => write!(f, "products"),
        }
    }
}

/// Which facets were fetched successfully.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetOutcomes {
    pub store: bool,
    pub categories: bool,
    pub banners: bool,
    pub products: bool,
}

impl FacetOutcomes {
    #[must_use]
    pub const fn succeeded(&self, facet: Facet) -> bool {
        match facet {
            Facet::Store => self.store,
            Facet::Categories => self.categories,
            Facet::Banners => self.banners,
            Facet::Products => self.products,
        }
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        Facet::ALL.iter().filter(|f| self.succeeded(**f)).count()
    }

    #[must_use]
    pub fn failed(&self) -> Vec<Facet> {
        Facet::ALL
            .into_iter()
            .filter(|f| !self.succeeded(*f))
            .collect()
    }
}

/// Everything a storefront page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontView {
    pub store: StoreIdentity,
    pub categories: Vec<Category>,
    pub banners: Vec<Banner>,
    pub products: Vec<Product>,
    pub status: ComposeStatus,
    pub facets: FacetOutcomes,
}

impl StorefrontView {
    /// Assemble a settled view from the four facet outcomes.
    ///
    /// `None` marks a failed facet. Failed facets fall back to the sentinel
    /// store name or an empty sequence; record order is kept as given.
    #[must_use]
    pub fn assemble(
        store: Option<StoreIdentity>,
        categories: Option<Vec<Category>>,
        banners: Option<Vec<Banner>>,
        products: Option<Vec<Product>>,
        fallback_name: &str,
    ) -> Self {
        let facets = FacetOutcomes {
            store: store.is_some(),
            categories: categories.is_some(),
            banners: banners.is_some(),
            products: products.is_some(),
        };

        let store = store.map_or_else(
            || StoreIdentity::fallback(fallback_name),
            |store| store.or_fallback_name(fallback_name),
        );
        let categories = categories.unwrap_or_default();
        let banners = banners.unwrap_or_default();
        let products = products.unwrap_or_default();

        let has_items = !(categories.is_empty() && banners.is_empty() && products.is_empty());
        let status = settled_status(&facets, has_items);

        Self {
            store,
            categories,
            banners,
            products,
            status,
            facets,
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.status, ComposeStatus::Ready)
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }
}

fn settled_status(facets: &FacetOutcomes, has_items: bool) -> ComposeStatus {
    match facets.success_count() {
        0 => ComposeStatus::Empty,
        n if n == Facet::ALL.len() && has_items => ComposeStatus::Ready,
        n if n == Facet::ALL.len() => ComposeStatus::Empty,
        _ => ComposeStatus::Partial,
    }
}

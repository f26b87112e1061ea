//! Read-only listings of the operator's records.
//!
//! Creating, editing and deleting records happens against the backend
//! directly; these pages only show what is there.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use secrecy::SecretString;

use crate::error::Result;
use crate::middleware::Operator;
use crate::state::AppState;

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub image: String,
    pub title: String,
    pub detail: String,
}

/// Listing page template shared by products, categories and banners.
#[derive(Template, WebTemplate)]
#[template(path = "console/catalog.html")]
pub struct CatalogTemplate {
    pub heading: &'static str,
    pub empty_message: &'static str,
    pub rows: Vec<CatalogRow>,
}

fn bearer(operator: &Operator) -> SecretString {
    SecretString::from(operator.0.token.clone())
}

/// List the operator's products.
pub async fn products(
    State(state): State<AppState>,
    operator: Operator,
) -> Result<CatalogTemplate> {
    let products = state.backend().owner_products(&bearer(&operator)).await?;

    let rows = products
        .iter()
        .map(|product| CatalogRow {
            image: product.image_or_placeholder().to_string(),
            title: product.name.clone(),
            detail: product.price_label(),
        })
        .collect();

    Ok(CatalogTemplate {
        heading: "Products",
        empty_message: "No products yet.",
        rows,
    })
}

/// List the operator's categories.
pub async fn categories(
    State(state): State<AppState>,
    operator: Operator,
) -> Result<CatalogTemplate> {
    let categories = state
        .backend()
        .owner_categories(&bearer(&operator))
        .await?;

    let rows = categories
        .iter()
        .map(|category| CatalogRow {
            image: category.image_or_placeholder().to_string(),
            title: category.name.clone(),
            detail: String::new(),
        })
        .collect();

    Ok(CatalogTemplate {
        heading: "Categories",
        empty_message: "No categories yet.",
        rows,
    })
}

/// List the operator's banners.
pub async fn banners(
    State(state): State<AppState>,
    operator: Operator,
) -> Result<CatalogTemplate> {
    let banners = state.backend().owner_banners(&bearer(&operator)).await?;

    let rows = banners
        .iter()
        .map(|banner| CatalogRow {
            image: banner.image_or_empty().to_string(),
            title: banner.title_or_default().to_string(),
            detail: banner.subtitle_or_empty().to_string(),
        })
        .collect();

    Ok(CatalogTemplate {
        heading: "Banners",
        empty_message: "No banners yet.",
        rows,
    })
}

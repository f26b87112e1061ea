//! Store, category, banner and product records.
//!
//! Field names follow the backend's JSON (`_id`, `imageUrl`, `categoryId`).
//! Unknown fields are ignored and missing optional fields default, so a
//! record with only an id still renders.

use serde::{Deserialize, Serialize};

use super::id::{BannerId, CategoryId, ProductId};
use super::price::Price;

/// Placeholder image for products without one.
pub const PRODUCT_IMAGE_PLACEHOLDER: &str = "/no-image.png";

/// Placeholder image for categories without one.
pub const CATEGORY_IMAGE_PLACEHOLDER: &str = "/no-category.png";

/// Public identity of a store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreIdentity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
}

impl StoreIdentity {
    /// A store known only by its sentinel name.
    #[must_use]
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            domain: String::new(),
        }
    }

    /// Replace a blank name with the sentinel name.
    #[must_use]
    pub fn or_fallback_name(mut self, name: &str) -> Self {
        if self.name.trim().is_empty() {
            self.name = name.to_string();
        }
        self
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl Category {
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        non_blank(self.image_url.as_deref()).unwrap_or(CATEGORY_IMAGE_PLACEHOLDER)
    }
}

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "_id", alias = "id")]
    pub id: BannerId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Banner {
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Banner")
    }

    #[must_use]
    pub fn subtitle_or_empty(&self) -> &str {
        self.subtitle.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_or_empty(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn link_or_anchor(&self) -> &str {
        non_blank(self.link.as_deref()).unwrap_or("#")
    }
}

/// Category of a product: either a bare id or the populated category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(CategoryId),
    Populated {
        #[serde(default)]
        name: Option<String>,
    },
}

/// A product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    /// Maximum retail price, shown struck through when above `price`.
    #[serde(default)]
    pub mrp: Option<Price>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "categoryId")]
    pub category: Option<CategoryRef>,
}

impl Product {
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        non_blank(self.image_url.as_deref()).unwrap_or(PRODUCT_IMAGE_PLACEHOLDER)
    }

    #[must_use]
    pub fn price_label(&self) -> String {
        self.price.map(|price| price.to_string()).unwrap_or_default()
    }

    /// The MRP label, only when it is higher than the selling price.
    #[must_use]
    pub fn mrp_label(&self) -> Option<String> {
        match (self.mrp, self.price) {
            (Some(mrp), Some(price)) if mrp > price => Some(mrp.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn sku_or_na(&self) -> &str {
        non_blank(self.sku.as_deref()).unwrap_or("N/A")
    }

    /// Category name when the backend populated it.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        match &self.category {
            Some(CategoryRef::Populated { name }) => {
                Some(non_blank(name.as_deref()).unwrap_or("Uncategorized"))
            }
            Some(CategoryRef::Id(_)) | None => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_backend_json() {
        let product: Product = serde_json::from_str(
            r#"{
                "_id": "p1",
                "name": "Wooden Train",
                "price": 499,
                "mrp": 699,
                "imageUrl": "data:image/png;base64,AAAA",
                "categoryId": { "_id": "c1", "name": "Toys" },
                "storeId": "s1",
                "__v": 0
            }"#,
        )
        .unwrap();

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price_label(), "₹499");
        assert_eq!(product.mrp_label().as_deref(), Some("₹699"));
        assert_eq!(product.category_name(), Some("Toys"));
        assert_eq!(product.sku_or_na(), "N/A");
    }

    #[test]
    fn test_product_category_as_bare_id() {
        let product: Product =
            serde_json::from_str(r#"{"_id":"p2","categoryId":"c9"}"#).unwrap();
        assert_eq!(
            product.category,
            Some(CategoryRef::Id(CategoryId::new("c9")))
        );
        assert_eq!(product.category_name(), None);
        assert_eq!(product.image_or_placeholder(), PRODUCT_IMAGE_PLACEHOLDER);
        assert_eq!(product.price_label(), "");
    }

    #[test]
    fn test_mrp_hidden_when_not_higher() {
        let product: Product =
            serde_json::from_str(r#"{"_id":"p3","price":500,"mrp":500}"#).unwrap();
        assert_eq!(product.mrp_label(), None);
    }

    #[test]
    fn test_banner_defaults() {
        let banner: Banner = serde_json::from_str(r#"{"_id":"b1","link":""}"#).unwrap();
        assert_eq!(banner.link_or_anchor(), "#");
        assert_eq!(banner.title_or_default(), "Banner");
        assert_eq!(banner.subtitle_or_empty(), "");
    }

    #[test]
    fn test_category_accepts_plain_id_field() {
        let category: Category = serde_json::from_str(r#"{"id":"c1","name":"Toys"}"#).unwrap();
        assert_eq!(category.id.as_str(), "c1");
        assert_eq!(category.image_or_placeholder(), CATEGORY_IMAGE_PLACEHOLDER);
    }

    #[test]
    fn test_store_identity_fallback_name() {
        let store = StoreIdentity {
            name: "  ".to_string(),
            domain: "acme".to_string(),
        };
        let store = store.or_fallback_name("Demo Store");
        assert_eq!(store.name, "Demo Store");
        assert_eq!(store.domain, "acme");
        assert_eq!(StoreIdentity::fallback("My Store").domain, "");
    }
}

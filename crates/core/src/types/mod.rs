//! Backend-owned records and supporting types.
//!
//! The backend is the source of truth for every record here. These types only
//! describe the fields the console and storefront render.

pub mod id;
pub mod price;
pub mod records;
pub mod status;

pub use id::*;
pub use price::Price;
pub use records::{Banner, Category, CategoryRef, Product, StoreIdentity};
pub use status::{ComposeStatus, Plan, TrialStatus};

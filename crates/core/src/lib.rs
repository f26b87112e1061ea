//! StoreBuilder Core - tenant dispatch and storefront composition types.
//!
//! This crate holds the pieces every StoreBuilder page depends on:
//! - `web` - host-dispatched server for the operator console and tenant storefronts
//! - `cli` - operator tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. Anything that talks to the network lives in `web`
//! and hands its results to the types defined here.
//!
//! # Modules
//!
//! - [`tenant`] - Resolve a host name into a console or storefront context
//! - [`domain`] - Normalize stored store domains into canonical storefront URLs
//! - [`session`] - Credential type and the session gate state machine
//! - [`view`] - Storefront view-model assembled from the four data facets
//! - [`types`] - Backend records, ids, prices and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod domain;
pub mod session;
pub mod tenant;
pub mod types;
pub mod view;

pub use domain::{StorefrontEnv, canonical_storefront_url, clean_domain, suggest_domain};
pub use session::{Credential, CredentialStore, GateState, SessionGate};
pub use tenant::{Mode, TenantContext, TenantSlug};
pub use types::*;
pub use view::{Facet, FacetOutcomes, StorefrontView};

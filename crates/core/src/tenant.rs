//! Tenant resolution from the request host.
//!
//! A bare host (`localhost`) or a `localhost.<tld>` host serves the operator
//! console. Any other host with at least two labels serves the storefront of
//! the tenant named by its left-most label, so `acme.example.com` and
//! `acme.localhost` both resolve to the `acme` storefront.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Left-most label that keeps a two-label host on the console.
pub const CONSOLE_LABEL: &str = "localhost";

/// Identifier of a tenant, taken from the left-most host label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Create a slug from any string.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which application a host serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Console,
    Storefront,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::Storefront => write!(f, "storefront"),
        }
    }
}

/// The resolved tenant context for one page load.
///
/// A storefront context always carries a slug and a console context never
/// does. The value is computed once per request and never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TenantContext {
    /// Operator console.
    Console,
    /// Public storefront of a single tenant.
    Storefront(TenantSlug),
}

impl TenantContext {
    /// Resolve a host name.
    ///
    /// Total over all strings: hosts with more than two labels, and two-label
    /// hosts whose first label is not literally `localhost`, are storefronts.
    /// Everything else is the console.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use storebuilder_core::{TenantContext, TenantSlug};
    /// assert_eq!(
    ///     TenantContext::resolve("acme.example.com"),
    ///     TenantContext::Storefront(TenantSlug::new("acme")),
    /// );
    /// assert_eq!(TenantContext::resolve("localhost"), TenantContext::Console);
    /// ```
    #[must_use]
    pub fn resolve(host: &str) -> Self {
        let mut labels = host.split('.');
        let first = labels.next().unwrap_or_default();

        match labels.count() {
            0 => Self::Console,
            1 if first == CONSOLE_LABEL => Self::Console,
            _ => Self::Storefront(TenantSlug::new(first)),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Console => Mode::Console,
            Self::Storefront(_) => Mode::Storefront,
        }
    }

    /// The tenant slug, present only for storefront contexts.
    #[must_use]
    pub const fn tenant_slug(&self) -> Option<&TenantSlug> {
        match self {
            Self::Console => None,
            Self::Storefront(slug) => Some(slug),
        }
    }

    #[must_use]
    pub const fn is_storefront(&self) -> bool {
        matches!(self, Self::Storefront(_))
    }
}

impl fmt::Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::Storefront(slug) => write!(f, "storefront:{slug}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront(slug: &str) -> TenantContext {
        TenantContext::Storefront(TenantSlug::new(slug))
    }

    #[test]
    fn test_three_or_more_labels_are_storefronts() {
        assert_eq!(TenantContext::resolve("acme.example.com"), storefront("acme"));
        assert_eq!(TenantContext::resolve("shop.acme.example.co.uk"), storefront("shop"));
        // The console label only matters for two-label hosts
        assert_eq!(
            TenantContext::resolve("localhost.example.com"),
            storefront("localhost")
        );
    }

    #[test]
    fn test_two_labels_storefront_unless_localhost() {
        assert_eq!(TenantContext::resolve("acme.localhost"), storefront("acme"));
        assert_eq!(TenantContext::resolve("mystore.com"), storefront("mystore"));
        assert_eq!(TenantContext::resolve("localhost.localdomain"), TenantContext::Console);
    }

    #[test]
    fn test_single_label_is_console() {
        assert_eq!(TenantContext::resolve("localhost"), TenantContext::Console);
        assert_eq!(TenantContext::resolve("intranet"), TenantContext::Console);
        assert_eq!(TenantContext::resolve(""), TenantContext::Console);
    }

    #[test]
    fn test_label_comparison_is_literal() {
        // Hosts are lowercased at the request boundary, not here
        assert_eq!(TenantContext::resolve("LOCALHOST.test"), storefront("LOCALHOST"));
    }

    #[test]
    fn test_degenerate_hosts_stay_total() {
        assert_eq!(TenantContext::resolve("acme."), storefront("acme"));
        assert_eq!(TenantContext::resolve(".com"), storefront(""));
        assert_eq!(TenantContext::resolve("..."), storefront(""));
    }

    #[test]
    fn test_slug_present_iff_storefront() {
        for host in ["localhost", "acme.localhost", "a.b.c", "localhost.dev", ""] {
            let context = TenantContext::resolve(host);
            assert_eq!(context.tenant_slug().is_some(), context.is_storefront(), "{host}");
            assert_eq!(
                context.mode() == Mode::Storefront,
                context.is_storefront(),
                "{host}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TenantContext::Console.to_string(), "console");
        assert_eq!(storefront("acme").to_string(), "storefront:acme");
        assert_eq!(Mode::Storefront.to_string(), "storefront");
    }
}

//! Canonical storefront URLs from stored domain values.
//!
//! Stores keep whatever the operator typed as their domain: a bare slug, a
//! full URL, or a host that still carries a development suffix from another
//! environment. [`canonical_storefront_url`] turns any of these into the URL
//! the store is reachable at in the current environment, falling back to the
//! demo storefront when nothing usable is left.

use serde::{Deserialize, Serialize};

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Environment settings that shape storefront URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontEnv {
    /// URL scheme without the separator (e.g. `http`).
    pub protocol: String,
    /// Local development host suffix (e.g. `.localhost:5173`).
    pub dev_suffix: Option<String>,
    /// Demo storefront location without a scheme (e.g. `localhost:5173/demo`).
    pub demo_path: String,
}

impl StorefrontEnv {
    /// Create an environment.
    ///
    /// A protocol given with its `://` separator is reduced to the bare
    /// scheme, trailing slashes are dropped from the dev suffix, and an empty
    /// dev suffix counts as unset.
    #[must_use]
    pub fn new(
        protocol: impl Into<String>,
        dev_suffix: Option<String>,
        demo_path: impl Into<String>,
    ) -> Self {
        let protocol: String = protocol.into();
        let protocol = protocol.trim().trim_end_matches('/').trim_end_matches(':');

        Self {
            protocol: protocol.to_string(),
            dev_suffix: dev_suffix
                .map(|suffix| suffix.trim().trim_end_matches('/').to_string())
                .filter(|suffix| !suffix.is_empty()),
            demo_path: demo_path.into(),
        }
    }

    /// URL of the demo storefront.
    #[must_use]
    pub fn demo_url(&self) -> String {
        format!("{}://{}", self.protocol, self.demo_path)
    }

    fn dev_suffix(&self) -> Option<&str> {
        self.dev_suffix.as_deref().filter(|suffix| !suffix.is_empty())
    }
}

/// Build the canonical storefront URL for a stored domain.
///
/// Idempotent: feeding the result back in returns the same URL. Absent,
/// empty or malformed domains resolve to the demo storefront.
///
/// # Example
///
/// ```rust
/// # use storebuilder_core::{StorefrontEnv, canonical_storefront_url};
/// let env = StorefrontEnv::new("http", Some(".mystore.local:5173".into()), "mystore.local:5173/demo");
/// assert_eq!(
///     canonical_storefront_url(Some("https://acme.mystore.local:5173/"), &env),
///     "http://acme.mystore.local:5173",
/// );
/// assert_eq!(canonical_storefront_url(None, &env), "http://mystore.local:5173/demo");
/// ```
#[must_use]
pub fn canonical_storefront_url(raw: Option<&str>, env: &StorefrontEnv) -> String {
    let Some(domain) = clean_domain(raw, env) else {
        return env.demo_url();
    };

    match env.dev_suffix() {
        Some(suffix) => format!("{}://{domain}{suffix}", env.protocol),
        None => format!("{}://{domain}", env.protocol),
    }
}

/// Reduce a stored domain to its environment-independent part.
///
/// Returns `None` when the value is absent, empty, malformed, or names the
/// demo storefront itself.
#[must_use]
pub fn clean_domain(raw: Option<&str>, env: &StorefrontEnv) -> Option<String> {
    let mut value = raw?.trim();

    while let Some(rest) = strip_scheme(value, &env.protocol) {
        value = rest.trim_start();
    }

    value = value.trim_end_matches('/');

    if let Some(suffix) = env.dev_suffix()
        && let Some(rest) = strip_suffix_ignore_case(value, suffix)
    {
        value = rest;
    }

    let value = value.trim();
    let malformed = value.is_empty()
        || value.contains("://")
        || value.chars().any(|c| c.is_whitespace() || c.is_control());

    if malformed || value == env.demo_path.trim_end_matches('/') {
        return None;
    }

    Some(value.to_string())
}

/// Suggest a store domain from its display name.
///
/// Lowercases the name and removes all whitespace.
#[must_use]
pub fn suggest_domain(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip a trailing host suffix, compared case-insensitively.
fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    value
        .get(split..)
        .filter(|tail| tail.eq_ignore_ascii_case(suffix))
        .and_then(|_| value.get(..split))
}

/// Strip one leading scheme, compared case-insensitively.
fn strip_scheme<'a>(value: &'a str, protocol: &str) -> Option<&'a str> {
    let own = format!("{protocol}://");

    SCHEMES
        .iter()
        .copied()
        .chain(std::iter::once(own.as_str()))
        .find_map(|scheme| {
            value
                .get(..scheme.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .and_then(|_| value.get(scheme.len()..))
        })
}

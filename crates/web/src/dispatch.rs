//! Host-based dispatch between the console and tenant storefronts.
//!
//! Every request is resolved exactly once: the host is read at a single
//! boundary ([`request_host`]), turned into a [`TenantContext`], and the
//! request is handed to either the storefront router or the console router.
//! Nothing inside a route set can switch to the other one.

use std::net::IpAddr;

use axum::{
    Router,
    extract::{Request, State},
    http::header,
    response::Response,
};
use storebuilder_core::TenantContext;
use tower::ServiceExt;
use tracing::Span;

/// Header set by reverse proxies carrying the client-facing host.
pub const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// The two route sets and how to pick between them.
#[derive(Clone)]
pub struct Dispatcher {
    storefront: Router,
    console: Router,
    trust_forwarded_host: bool,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(storefront: Router, console: Router, trust_forwarded_host: bool) -> Self {
        Self {
            storefront,
            console,
            trust_forwarded_host,
        }
    }

    /// Router that resolves the tenant for every request and forwards it.
    pub fn into_router(self) -> Router {
        Router::new().fallback(dispatch).with_state(self)
    }
}

async fn dispatch(State(dispatcher): State<Dispatcher>, mut request: Request) -> Response {
    let context = resolve_request(&request, dispatcher.trust_forwarded_host);
    Span::current().record("tenant", tracing::field::display(&context));

    let router = match &context {
        TenantContext::Console => dispatcher.console,
        TenantContext::Storefront(slug) => {
            request.extensions_mut().insert(slug.clone());
            dispatcher.storefront
        }
    };
    request.extensions_mut().insert(context);

    router
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
}

/// Resolve the tenant context of a request.
pub fn resolve_request<B>(request: &axum::http::Request<B>, trust_forwarded: bool) -> TenantContext {
    resolve_host(&request_host(request, trust_forwarded))
}

/// Resolve a port-less host name.
///
/// IP-literal hosts are never tenant hosts and always get the console.
#[must_use]
pub fn resolve_host(host: &str) -> TenantContext {
    if host.parse::<IpAddr>().is_ok() {
        return TenantContext::Console;
    }
    TenantContext::resolve(host)
}

/// Read the host a visitor addressed, without port, lowercased.
///
/// `X-Forwarded-Host` is only consulted when `trust_forwarded` is set; the
/// first entry of a comma-separated list wins. Falls back to the `Host`
/// header, then to the request URI's authority.
pub fn request_host<B>(request: &axum::http::Request<B>, trust_forwarded: bool) -> String {
    let authority = trust_forwarded
        .then(|| first_header_value(request, FORWARDED_HOST_HEADER))
        .flatten()
        .or_else(|| first_header_value(request, header::HOST.as_str()))
        .or_else(|| request.uri().host())
        .unwrap_or_default();

    hostname(authority)
}

fn first_header_value<'a, B>(request: &'a axum::http::Request<B>, name: &str) -> Option<&'a str> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Strip the port from an authority and lowercase it.
#[must_use]
pub fn hostname(authority: &str) -> String {
    let authority = authority.trim();

    let host = match authority.strip_prefix('[') {
        // [::1]:5173
        Some(rest) => rest.split_once(']').map_or(rest, |(host, _)| host),
        None => authority
            .rsplit_once(':')
            .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
            .map_or(authority, |(host, _)| host),
    };

    host.to_ascii_lowercase()
}

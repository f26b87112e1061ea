//! `sb-cli resolve` - show which application a host serves.

use storebuilder_core::TenantContext;
use storebuilder_web::dispatch::{hostname, resolve_host};

/// One-line description of the context a host resolves to.
#[must_use]
pub fn describe(authority: &str) -> String {
    let host = hostname(authority);
    match resolve_host(&host) {
        TenantContext::Console => format!("{host}: console"),
        TenantContext::Storefront(slug) => format!("{host}: storefront (tenant \"{slug}\")"),
    }
}

#[allow(clippy::print_stdout)]
pub fn run(authority: &str) {
    println!("{}", describe(authority));
}

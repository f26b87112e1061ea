//! `sb-cli store-url` - normalize a stored domain.

use storebuilder_core::{StorefrontEnv, canonical_storefront_url};

#[allow(clippy::print_stdout)]
pub fn run(domain: Option<&str>, protocol: String, dev_suffix: Option<String>, demo_path: String) {
    let env = StorefrontEnv::new(protocol, dev_suffix, demo_path);
    println!("{}", canonical_storefront_url(domain, &env));
}


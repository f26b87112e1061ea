//! StoreBuilder CLI - tenant and storefront diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Which application does a host serve?
//! sb-cli resolve acme.example.com
//!
//! # Canonical storefront URL for a stored domain
//! sb-cli store-url "https://acme.localhost:5173/" --dev-suffix .localhost:5173
//!
//! # Compose a tenant's storefront against a live backend
//! sb-cli compose acme --api-url http://localhost:5000
//! ```
//!
//! # Commands
//!
//! - `resolve` - Resolve a host to the console or a tenant storefront
//! - `store-url` - Normalize a stored domain into a storefront URL
//! - `compose` - Fetch and compose a tenant's storefront view as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "StoreBuilder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a host name to a tenant context
    Resolve {
        /// Host as a browser would send it (port allowed)
        host: String,
    },
    /// Build the canonical storefront URL for a stored domain
    StoreUrl {
        /// Stored domain value; omit for the demo storefront
        domain: Option<String>,

        /// Scheme of the generated URL
        #[arg(long, default_value = "http")]
        protocol: String,

        /// Local development host suffix (e.g. `.localhost:5173`)
        #[arg(long)]
        dev_suffix: Option<String>,

        /// Demo storefront location without a scheme
        #[arg(long, default_value = "localhost:5173/demo")]
        demo_path: String,
    },
    /// Compose a tenant's storefront view and print it as JSON
    Compose {
        /// Tenant slug
        slug: String,

        /// Backend base URL
        #[arg(long, env = "STOREBUILDER_API_URL", default_value = "http://localhost:5000")]
        api_url: String,

        /// Backend request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Store name used when the store identity is unavailable
        #[arg(long, default_value = "Demo Store")]
        fallback_name: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Resolve { host } => commands::resolve::run(&host),
        Commands::StoreUrl {
            domain,
            protocol,
            dev_suffix,
            demo_path,
        } => commands::store_url::run(domain.as_deref(), protocol, dev_suffix, demo_path),
        Commands::Compose {
            slug,
            api_url,
            timeout_secs,
            fallback_name,
        } => commands::compose::run(&slug, &api_url, timeout_secs, &fallback_name).await?,
    }
    Ok(())
}

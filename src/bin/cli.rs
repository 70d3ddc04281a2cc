//! Command-line companion for link-expander.
//!
//! Resolves and canonicalizes links locally, or asks a running service to
//! expand them, without going through a browser.
//!
//! # Usage
//!
//! ```bash
//! # Follow the redirect chain locally
//! cargo run --bin link-expander-cli -- resolve https://b23.tv/xYz12
//!
//! # Only apply the canonical URL rules
//! cargo run --bin link-expander-cli -- canonicalize "https://www.bilibili.com/video/BV1xx411c7mD?p=1"
//!
//! # Ask a running service, following nested short links
//! cargo run --bin link-expander-cli -- expand https://t.co/abc --endpoint http://localhost:3000
//! ```
//!
//! # Environment Variables
//!
//! - `EXPANDER_ENDPOINT` (optional): default for `expand --endpoint`
//! - `RUST_LOG` (optional): log filter, e.g. `debug` to see every hop

use link_expander::application::services::ExpansionService;
use link_expander::client::{ClientConfig, DEFAULT_ENDPOINT, ExpanderClient};
use link_expander::domain::resolver::DEFAULT_MAX_REDIRECTS;
use link_expander::domain::{Platform, PlatformCanonicalizer};
use link_expander::infrastructure::cache::{DEFAULT_SERVER_TTL_SECONDS, EdgeCache, NullCache};
use link_expander::infrastructure::http::RedirectResolver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI tool for expanding short links.
#[derive(Parser)]
#[command(name = "link-expander-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow a link's redirects locally and print the canonical result
    Resolve {
        url: String,

        /// Redirect hops to follow
        #[arg(short, long, default_value_t = DEFAULT_MAX_REDIRECTS)]
        max_redirects: usize,
    },

    /// Apply the canonical URL rules without any network access
    Canonicalize { url: String },

    /// Expand a link through a running expansion service
    Expand {
        link: String,

        /// Base URL of the expansion service
        #[arg(short, long, env = "EXPANDER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { url, max_redirects } => resolve(&url, max_redirects).await,
        Commands::Canonicalize { url } => {
            canonicalize(&url);
            Ok(())
        }
        Commands::Expand { link, endpoint } => expand(&link, endpoint).await,
    }
}

async fn resolve(url: &str, max_redirects: usize) -> Result<()> {
    println!("{}", "🔗 Resolving link".bright_blue().bold());
    println!();

    let platform = Platform::bilibili();
    let resolver = RedirectResolver::new(platform.clone(), max_redirects)
        .context("Failed to build HTTP client")?;
    let service = ExpansionService::new(
        Arc::new(resolver),
        PlatformCanonicalizer::new(platform),
        EdgeCache::new(Arc::new(NullCache::new()), DEFAULT_SERVER_TTL_SECONDS),
    );

    match service.resolve_uncached(url).await {
        Ok(result) => {
            print_pair(&result.original_url, &result.expanded_url);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            Err(e.into())
        }
    }
}

fn canonicalize(url: &str) {
    let canonicalizer = PlatformCanonicalizer::new(Platform::bilibili());
    let canonical = canonicalizer.canonicalize(url);

    print_pair(url, &canonical);
    if canonical == url {
        println!("  {}", "(unchanged)".bright_black());
    }
    println!();
}

async fn expand(link: &str, endpoint: String) -> Result<()> {
    let client = ExpanderClient::new(ClientConfig::new(endpoint));

    println!(
        "{} {}",
        "🌐 Expanding via".bright_blue().bold(),
        client.config().endpoint().cyan()
    );
    println!();

    let expanded = client.expand(link).await;
    print_pair(link, &expanded);
    if expanded == link {
        println!("  {}", "(not expanded)".yellow());
    }
    println!();
    Ok(())
}

fn print_pair(original: &str, expanded: &str) {
    println!("  Original: {}", original.cyan());
    println!("  Expanded: {}", expanded.bright_green().bold());
}

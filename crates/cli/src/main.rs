//! Fraghead CLI - catalog inspection and dataset validation.
//!
//! # Usage
//!
//! ```bash
//! # Print the decant table, cheapest 5ml first, official vials only
//! fh-cli catalog --sort price-low --filter official
//!
//! # Search the product listing
//! fh-cli products --search oud --category Sets
//!
//! # Check the catalog documents before deploying them
//! fh-cli validate --data-dir crates/storefront/static/data
//! ```
//!
//! Catalog documents are read from the same place the storefront reads them
//! (`STOREFRONT_DATA_DIR` / `STOREFRONT_DATA_URL`) unless `--data-dir` or
//! `--data-url` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fraghead_core::catalog::{CategoryFilter, SortKey};
use url::Url;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "fh-cli")]
#[command(author, version, about = "Fraghead CLI tools")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read catalog documents from.
#[derive(Args)]
struct SourceArgs {
    /// Read catalog documents from this directory
    #[arg(long, global = true, conflicts_with = "data_url")]
    data_dir: Option<PathBuf>,

    /// Fetch catalog documents relative to this URL
    #[arg(long, global = true)]
    data_url: Option<Url>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged decant table
    Catalog {
        /// Sort key (`name`, `price-low`, `price-high`)
        #[arg(short, long, default_value = "name")]
        sort: SortKey,

        /// Category filter (`all`, `official`, `collection`)
        #[arg(short, long, default_value = "all")]
        filter: CategoryFilter,
    },
    /// Print the product listing
    Products {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// Check catalog documents for duplicate ids and bad prices
    Validate,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fh_cli=info,fraghead_storefront=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let catalog = commands::catalog_config(cli.source.data_dir, cli.source.data_url)?;

    match cli.command {
        Commands::Catalog { sort, filter } => commands::catalog::fragrances(&catalog, sort, filter).await,
        Commands::Products { search, category } => {
            commands::catalog::products(&catalog, search, category).await
        }
        Commands::Validate => commands::validate::run(&catalog).await,
    }
}

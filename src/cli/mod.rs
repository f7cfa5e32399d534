use std::path::PathBuf;

use anyhow::Context;
use bullion_store::{catalog::Catalog, store::Storefront};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::logging::LoggingConfig;

mod catalog;
mod product;
mod reset_password;
mod session;

#[derive(Debug, Parser)]
#[command(name = "bullion-store", about = "Bullion storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// Catalog YAML file; the built-in catalog is used when omitted
    #[arg(long, global = true, env = "BULLION_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered and sorted
    Catalog(catalog::CatalogArgs),

    /// Show one product with related products
    Product(product::ProductArgs),

    /// Read storefront commands from stdin
    Session,

    /// Request a password reset link
    ResetPassword(reset_password::ResetPasswordArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Catalog(args) => catalog::run(args, &open_store(self.catalog)?),
            Commands::Product(args) => product::run(args, open_store(self.catalog)?),
            Commands::Session => session::run(open_store(self.catalog)?),
            Commands::ResetPassword(args) => reset_password::run(args).await,
        }
    }
}

fn open_store(path: Option<PathBuf>) -> anyhow::Result<Storefront> {
    let catalog = match path {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::embedded().context("failed to load built-in catalog")?,
    };

    debug!(products = catalog.len(), currency = catalog.currency().iso_alpha_code, "catalog loaded");

    Ok(Storefront::new(catalog))
}

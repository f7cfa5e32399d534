use std::io::{self, Write};

use bullion_store::{products::ProductId, store::Storefront, summary};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    id: u32,
}

pub(crate) fn run(args: ProductArgs, mut store: Storefront) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    summary::write_product(&mut out, store.view_product(ProductId::from(args.id))?)?;

    let related = store.related_products();

    if !related.is_empty() {
        writeln!(out, "Benzer ürünler")?;
        summary::write_listing(&mut out, &related)?;
    }

    Ok(())
}

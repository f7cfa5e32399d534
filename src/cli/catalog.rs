use std::io;

use bullion_store::{
    categories::Category,
    listing::{CategoryFilter, Listing, PriceRange, SortOrder},
    store::Storefront,
    summary,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Only list this category, e.g. "GRAM KÜLÇE ALTIN"
    #[arg(long)]
    category: Option<String>,

    /// Price bucket
    #[arg(long, value_enum, default_value_t = PriceRange::All)]
    price_range: PriceRange,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortOrder::Featured)]
    sort: SortOrder,
}

pub(crate) fn run(args: CatalogArgs, store: &Storefront) -> anyhow::Result<()> {
    let products = Listing::new()
        .category(CategoryFilter::from(args.category.map(Category::new)))
        .price_range(args.price_range)
        .sort(args.sort)
        .apply(&store.products());

    summary::write_listing(io::stdout().lock(), &products)?;

    Ok(())
}

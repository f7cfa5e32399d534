//! Listing
//!
//! Filtering and sorting for the home grid and category pages. Listings are
//! derived on demand from a product slice and never stored.

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::{categories::Category, products::Product};

/// Upper bound of [`PriceRange::Low`], in whole currency units.
pub const LOW_PRICE_LIMIT: i64 = 10_000;

/// Upper bound of [`PriceRange::Medium`], in whole currency units.
pub const MEDIUM_PRICE_LIMIT: i64 = 50_000;

/// Unrecognised filter or sort value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// Unknown price range value
    #[error("Unknown price range: {0}")]
    UnknownPriceRange(String),

    /// Unknown sort value
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Price bucket filter for category pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PriceRange {
    /// No price filter
    #[default]
    All,

    /// Below 10 000
    Low,

    /// From 10 000 up to, but not including, 50 000
    Medium,

    /// 50 000 and above
    High,
}

impl PriceRange {
    /// Whether the product's price falls in this bucket.
    ///
    /// Bounds are whole units of the product's currency.
    pub fn contains(self, product: &Product) -> bool {
        let minor_units = product.price.to_minor_units();
        let unit = 10_i64.saturating_pow(product.price.currency().exponent);

        let low = LOW_PRICE_LIMIT.saturating_mul(unit);
        let medium = MEDIUM_PRICE_LIMIT.saturating_mul(unit);

        match self {
            PriceRange::All => true,
            PriceRange::Low => minor_units < low,
            PriceRange::Medium => (low..medium).contains(&minor_units),
            PriceRange::High => minor_units >= medium,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PriceRange::All => "all",
            PriceRange::Low => "low",
            PriceRange::Medium => "medium",
            PriceRange::High => "high",
        }
    }
}

impl FromStr for PriceRange {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(PriceRange::All),
            "low" => Ok(PriceRange::Low),
            "medium" => Ok(PriceRange::Medium),
            "high" => Ok(PriceRange::High),
            other => Err(ListingError::UnknownPriceRange(other.to_string())),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for listings. All orders are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Featured products first
    #[default]
    Featured,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// By name
    Name,
}

impl SortOrder {
    /// Compare two products under this order.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Featured => b.featured.cmp(&a.featured),
            SortOrder::PriceLow => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
            SortOrder::PriceHigh => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
            SortOrder::Name => compare_names(&a.name, &b.name),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Name => "name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(SortOrder::Featured),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "name" => Ok(SortOrder::Name),
            other => Err(ListingError::UnknownSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase letters in Turkish alphabetical order, with q, w and x slotted in.
const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

// Turkish collation, case-insensitive, then by raw text.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(collation_key)
        .cmp(b.chars().map(collation_key))
        .then_with(|| a.cmp(b))
}

/// Sort key for one character. Spaces, digits and punctuation sort before
/// letters; letters outside the alphabet sort after it.
fn collation_key(c: char) -> (u8, u32) {
    let lower = turkish_lowercase(c);

    match TURKISH_ALPHABET
        .chars()
        .zip(0_u32..)
        .find(|(letter, _)| *letter == lower)
    {
        Some((_, rank)) => (1, rank),
        None if lower.is_alphabetic() => (2, u32::from(lower)),
        None => (0, u32::from(lower)),
    }
}

fn turkish_lowercase(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Category filter for the home grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Whether the product belongs to the filtered category.
    pub fn contains(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// A filtered, sorted view over products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Category filter
    pub category: CategoryFilter,

    /// Price bucket filter
    pub price_range: PriceRange,

    /// Sort order
    pub sort: SortOrder,
}

impl Listing {
    /// Listing over every product, featured first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one category.
    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Restrict to a price bucket.
    #[must_use]
    pub fn price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Apply the filters and sort to `products`, returning copies.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut listed: Vec<Product> = products
            .iter()
            .filter(|product| self.category.contains(product))
            .filter(|product| self.price_range.contains(product))
            .cloned()
            .collect();

        // `sort_by` is stable, which keeps catalog order within equal keys.
        listed.sort_by(|a, b| self.sort.compare(a, b));

        listed
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{categories, products::tests::product};

    use super::*;

    fn priced(id: u32, lira: i64) -> Product {
        product(id, categories::GOLD_BARS, lira * 100)
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn price_range_bounds() {
        let below_low = priced(1, 9_999);
        let at_low = priced(2, 10_000);
        let below_medium = priced(3, 49_999);
        let at_medium = priced(4, 50_000);

        assert!(PriceRange::Low.contains(&below_low));
        assert!(!PriceRange::Low.contains(&at_low));
        assert!(PriceRange::Medium.contains(&at_low));
        assert!(PriceRange::Medium.contains(&below_medium));
        assert!(!PriceRange::Medium.contains(&at_medium));
        assert!(PriceRange::High.contains(&at_medium));
        assert!(!PriceRange::High.contains(&below_medium));

        for product in [&below_low, &at_low, &below_medium, &at_medium] {
            assert!(PriceRange::All.contains(product));
        }
    }

    #[test]
    fn price_ranges_partition_products() {
        let products = [priced(1, 0), priced(2, 10_000), priced(3, 50_000), priced(4, 1_000_000)];

        for product in &products {
            let matches = [PriceRange::Low, PriceRange::Medium, PriceRange::High]
                .into_iter()
                .filter(|range| range.contains(product))
                .count();

            assert_eq!(matches, 1, "product {} in {matches} ranges", product.id);
        }
    }

    #[test]
    fn featured_sort_is_stable() {
        let mut products = vec![priced(1, 5), priced(2, 4), priced(3, 3), priced(4, 2)];

        if let Some(product) = products.get_mut(1) {
            product.featured = true;
        }
        if let Some(product) = products.get_mut(3) {
            product.featured = true;
        }

        let listed = Listing::new().apply(&products);

        assert_eq!(ids(&listed), vec![2, 4, 1, 3]);
    }

    #[test]
    fn price_sorts() {
        let products = vec![priced(1, 300), priced(2, 100), priced(3, 200), priced(4, 100)];

        let ascending = Listing::new().sort(SortOrder::PriceLow).apply(&products);
        let descending = Listing::new().sort(SortOrder::PriceHigh).apply(&products);

        assert_eq!(ids(&ascending), vec![2, 4, 3, 1]);
        assert_eq!(ids(&descending), vec![1, 3, 2, 4]);
    }

    #[test]
    fn name_sort_follows_turkish_alphabet() {
        let mut products = vec![priced(1, 1), priced(2, 1), priced(3, 1)];

        for (product, name) in products.iter_mut().zip(["Yarım Altın", "Çeyrek", "Tam Altın"]) {
            product.name = name.to_string();
        }

        let listed = Listing::new().sort(SortOrder::Name).apply(&products);

        assert_eq!(ids(&listed), vec![2, 3, 1]);
    }

    #[test]
    fn turkish_letters_follow_their_base_letters() {
        assert_eq!(compare_names("Çeyrek", "Cam"), Ordering::Greater);
        assert_eq!(compare_names("Çeyrek", "Dolar"), Ordering::Less);
        assert_eq!(compare_names("Ğ", "H"), Ordering::Less);
        assert_eq!(compare_names("Işık", "İnci"), Ordering::Less);
        assert_eq!(compare_names("Öz", "Pul"), Ordering::Less);
        assert_eq!(compare_names("Şerit", "Tam"), Ordering::Less);
        assert_eq!(compare_names("Üç", "Vakıf"), Ordering::Less);
    }

    #[test]
    fn name_sort_ignores_case_and_puts_digits_first() {
        assert_eq!(compare_names("altın", "Bilezik"), Ordering::Less);
        assert_eq!(compare_names("1 Kilogram", "100 Gram"), Ordering::Less);
        assert_eq!(compare_names("250 Gram", "Çeyrek"), Ordering::Less);
        assert_eq!(compare_names("Altın", "altın"), Ordering::Less);
    }

    #[test]
    fn category_filter_keeps_only_matching_products() {
        let products = vec![
            product(1, categories::GOLD_BARS, 100),
            product(2, categories::SILVER_BARS, 100),
            product(3, categories::GOLD_BARS, 100),
        ];

        let gold = Listing::new()
            .category(Category::new(categories::GOLD_BARS))
            .apply(&products);
        let everything = Listing::new().category(CategoryFilter::All).apply(&products);

        assert_eq!(ids(&gold), vec![1, 3]);
        assert_eq!(ids(&everything), vec![1, 2, 3]);
    }

    #[test]
    fn filters_combine() {
        let products = vec![priced(1, 5_000), priced(2, 20_000), priced(3, 60_000)];

        let listed = Listing::new()
            .category(Category::new(categories::GOLD_BARS))
            .price_range(PriceRange::Medium)
            .apply(&products);

        assert_eq!(ids(&listed), vec![2]);
    }

    #[test]
    fn parses_control_values() -> TestResult {
        assert_eq!("all".parse::<PriceRange>()?, PriceRange::All);
        assert_eq!("medium".parse::<PriceRange>()?, PriceRange::Medium);
        assert_eq!("price-low".parse::<SortOrder>()?, SortOrder::PriceLow);
        assert_eq!("name".parse::<SortOrder>()?, SortOrder::Name);

        assert_eq!(
            "cheap".parse::<PriceRange>(),
            Err(ListingError::UnknownPriceRange("cheap".to_string()))
        );
        assert_eq!(
            "newest".parse::<SortOrder>(),
            Err(ListingError::UnknownSortOrder("newest".to_string()))
        );

        Ok(())
    }

    #[test]
    fn display_round_trips_through_from_str() -> TestResult {
        for sort in [
            SortOrder::Featured,
            SortOrder::PriceLow,
            SortOrder::PriceHigh,
            SortOrder::Name,
        ] {
            assert_eq!(sort.to_string().parse::<SortOrder>()?, sort);
        }

        Ok(())
    }
}

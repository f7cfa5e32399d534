//! Product Fixtures

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    categories::Category,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product image URL
    pub image: String,

    /// Product category
    pub category: Category,

    /// Display weight
    #[serde(default)]
    pub weight: Option<String>,

    /// Display purity
    #[serde(default)]
    pub purity: Option<String>,

    /// Price, e.g. "4250.00 TRY"
    pub price: String,

    /// Price before discount
    #[serde(default)]
    pub original_price: Option<String>,

    /// Stock flag
    pub in_stock: bool,

    /// Merchandising flag
    #[serde(default)]
    pub featured: bool,

    /// Initial like counter
    #[serde(default)]
    pub likes: u32,

    /// Initial liked flag
    #[serde(default)]
    pub is_liked: bool,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor_units, original_currency)| {
                if original_currency == currency {
                    Ok(Money::from_minor(minor_units, original_currency))
                } else {
                    Err(CatalogError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        original_currency.iso_alpha_code.to_string(),
                    ))
                }
            })
            .transpose()?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            image: fixture.image,
            category: fixture.category,
            weight: fixture.weight,
            purity: fixture.purity,
            price,
            original_price,
            in_stock: fixture.in_stock,
            featured: fixture.featured,
            likes: fixture.likes,
            is_liked: fixture.is_liked,
        })
    }
}

/// Parse a price string like "4250.00 TRY" into minor units and currency.
///
/// # Errors
///
/// - [`CatalogError::InvalidPrice`]: the amount is malformed, negative, or has more
///   fraction digits than the currency allows.
/// - [`CatalogError::UnknownCurrency`]: the currency code is not an ISO currency.
pub fn parse_price(price: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let invalid = || CatalogError::InvalidPrice(price.to_string());

    let (amount, code) = price.trim().split_once(' ').ok_or_else(invalid)?;

    let currency =
        iso::find(code.trim()).ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))?;

    let amount = Decimal::from_str(amount.trim()).map_err(|_err| invalid())?;

    if amount.is_sign_negative() || amount.scale() > currency.exponent {
        return Err(invalid());
    }

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .ok_or_else(invalid)?;

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(invalid)?;

    Ok((minor_units, currency))
}

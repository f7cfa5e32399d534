//! Products

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;

use crate::categories::Category;

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a new product id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product image URL
    pub image: String,

    /// Product category
    pub category: Category,

    /// Display weight, e.g. "1 gr"
    pub weight: Option<String>,

    /// Display purity, e.g. "24 Ayar / 999.9"
    pub purity: Option<String>,

    /// Current price
    pub price: Money<'static, Currency>,

    /// Price before discount, shown struck through
    pub original_price: Option<Money<'static, Currency>>,

    /// Whether the product can be added to the cart
    pub in_stock: bool,

    /// Merchandising flag, sorted first by default
    pub featured: bool,

    /// Like counter
    pub likes: u32,

    /// Whether the current visitor likes the product
    pub is_liked: bool,
}

impl Product {
    /// Whether the product is sold below its original price.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| {
            original.currency() == self.price.currency()
                && original.to_minor_units() > self.price.to_minor_units()
        })
    }

    /// Amount saved against the original price, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the two prices have different currencies.
    pub fn savings(&self) -> Result<Option<Money<'static, Currency>>, MoneyError> {
        self.original_price
            .map(|original| original.sub(self.price))
            .transpose()
    }

    /// Discount as a fraction of the original price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the two prices have different currencies.
    pub fn discount_percent(&self) -> Result<Option<Percentage>, MoneyError> {
        let Some(original) = self.original_price else {
            return Ok(None);
        };

        let savings = original.sub(self.price)?;
        let original_minor = original.to_minor_units();

        if original_minor <= 0 || savings.to_minor_units() <= 0 {
            return Ok(None);
        }

        let savings_dec = Decimal::from_i64(savings.to_minor_units()).unwrap_or(Decimal::ZERO);
        let original_dec = Decimal::from_i64(original_minor).unwrap_or(Decimal::ONE);

        Ok(Some(Percentage::from(savings_dec / original_dec)))
    }
}

//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, line_total, total_price},
    products::{Product, ProductId},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Lines always hold at least one unit.
    #[error("Cannot add zero units of product {0}")]
    ZeroQuantity(ProductId),

    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Accumulated quantity does not fit in a line.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),
}

/// A product and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product: Product,
    quantity: u32,
}

impl CartItem {
    /// Creates a new line.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product on this line
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the line total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        line_total(self.product.price, self.quantity)
    }
}

/// Session cart. Holds at most one line per product id, in the order products were first added.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add units of a product, accumulating into its existing line if there is one.
    ///
    /// Returns the line's quantity after the addition.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the accumulated quantity overflows.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<u32, CartError> {
        let id = product.id;

        if quantity == 0 {
            return Err(CartError::ZeroQuantity(id));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == id) {
            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow(id))?;

            return Ok(item.quantity);
        }

        self.items.push(CartItem::new(product, quantity));

        Ok(quantity)
    }

    /// Set the quantity of a line. Zero removes the line; unknown products are ignored.
    ///
    /// Returns the updated line, or `None` if the line was removed or never existed.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Option<&CartItem> {
        if quantity == 0 {
            self.remove(id);

            return None;
        }

        let item = self.items.iter_mut().find(|item| item.product.id == id)?;
        item.quantity = quantity;

        Some(&*item)
    }

    /// Remove a product's line, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        self.position(id).map(|position| self.items.remove(position))
    }

    /// Get the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == id)
    }

    /// Calculate the cart total.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or overflow error.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }
}

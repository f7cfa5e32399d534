//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartItem;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Price times quantity does not fit in minor units.
    #[error("line total overflows: {minor_units} x {quantity}")]
    Overflow {
        /// Unit price in minor units
        minor_units: i64,
        /// Line quantity
        quantity: u32,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `price`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total(
    price: Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor_units = price.to_minor_units();

    let total = minor_units
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow {
            minor_units,
            quantity,
        })?;

    Ok(Money::from_minor(total, price.currency()))
}

/// Calculates the total price of a list of cart lines
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: A line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(items: &[CartItem]) -> Result<Money<'static, Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    items.iter().try_fold(
        Money::from_minor(0, first.product().price.currency()),
        |acc, item| Ok(acc.add(item.line_total()?)?),
    )
}

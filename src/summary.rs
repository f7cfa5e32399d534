//! Summary
//!
//! Terminal tables for the cart panel and product listings.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, pricing::TotalPriceError, products::Product};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating line or cart totals.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error writing to the output.
    #[error("Failed to write summary")]
    IO,
}

/// Write the cart panel: one row per line, then the item count and total.
///
/// # Errors
///
/// Returns an error if a line total overflows or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    if cart.is_empty() {
        return writeln!(out, "Sepetiniz boş").map_err(|_err| SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Ürün", "Adet", "Birim Fiyat", "Tutar"]);

    for item in cart.iter() {
        let product = item.product();

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            item.quantity().to_string(),
            product.price.to_string(),
            item.line_total()?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;
    writeln!(out, " Ürün adedi: {}", cart.item_count()).map_err(|_err| SummaryError::IO)?;
    writeln!(out, " \x1b[1mToplam:\x1b[0m {}", cart.total()?).map_err(|_err| SummaryError::IO)
}

/// Write a product listing in the order given.
///
/// # Errors
///
/// Returns an error if a discount cannot be computed or the output cannot be written.
pub fn write_listing(mut out: impl io::Write, products: &[Product]) -> Result<(), SummaryError> {
    if products.is_empty() {
        return writeln!(out, "Bu kriterlere uygun ürün bulunamadı")
            .map_err(|_err| SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Ürün", "Ağırlık", "Fiyat", "İndirim", "Beğeni", "Stok"]);

    for product in products {
        let discount = match product.discount_percent()? {
            Some(percent) if product.is_discounted() => {
                format!("İNDİRİM %{}", percent_points(percent))
            }
            _ => String::new(),
        };

        let likes = if product.is_liked {
            format!("♥ {}", product.likes)
        } else {
            product.likes.to_string()
        };

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.weight.clone().unwrap_or_default(),
            product.price.to_string(),
            discount,
            likes,
            stock_label(product).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// Write the detail view of one product.
///
/// # Errors
///
/// Returns an error if savings cannot be computed or the output cannot be written.
pub fn write_product(mut out: impl io::Write, product: &Product) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Ürün", product.name.as_str()]);
    builder.push_record(["Kategori", product.category.name()]);

    if let Some(weight) = &product.weight {
        builder.push_record(["Ağırlık", weight.as_str()]);
    }

    if let Some(purity) = &product.purity {
        builder.push_record(["Saflık", purity.as_str()]);
    }

    builder.push_record(["Fiyat".to_string(), product.price.to_string()]);

    if product.is_discounted()
        && let Some(original) = &product.original_price
    {
        builder.push_record(["Eski Fiyat".to_string(), original.to_string()]);

        if let Some(savings) = product.savings()? {
            builder.push_record(["Kazancınız".to_string(), savings.to_string()]);
        }
    }

    builder.push_record(["Beğeni".to_string(), product.likes.to_string()]);
    builder.push_record(["Stok", stock_label(product)]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::first(), Color::BOLD);

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// `Percentage` is a fraction, shown as whole percent points.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(0)
}

fn stock_label(product: &Product) -> &'static str {
    if product.in_stock {
        "Stokta"
    } else {
        "Tükendi"
    }
}

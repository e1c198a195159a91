//! Receipt
//!
//! Terminal rendering for product listings, cart contents and order
//! confirmations.

use std::{fmt::Write, io, ops::Range};

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartLine, checkout::OrderConfirmation, prices::format_price, products::Product,
};

const BOLD: &str = "\x1b[1m";
const DARK_GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a product listing table.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_products(out: &mut impl io::Write, products: &[&Product]) -> Result<(), ReceiptError> {
    if products.is_empty() {
        return writeln!(out, "No products found").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Sizes", "Released", "Price"]);

    for product in products {
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            product.category.to_string(),
            product.sizes.join(" "),
            product.release_date.strftime("%Y-%m-%d").to_string(),
            format_price(product.price),
        ]);
    }

    let table_str = finish_table(builder, 5..6);

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

/// Writes the cart table followed by its item count and total.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_cart(out: &mut impl io::Write, lines: &[CartLine]) -> Result<(), ReceiptError> {
    if lines.is_empty() {
        return writeln!(out, "Your cart is empty").map_err(|_err| ReceiptError::IO);
    }

    write_lines_table(out, lines)?;
    write_summary(out, lines)
}

/// Writes an order confirmation: order number, shipping details, and the
/// lines that were ordered.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_confirmation(
    out: &mut impl io::Write,
    confirmation: &OrderConfirmation,
) -> Result<(), ReceiptError> {
    let shipping = &confirmation.shipping;

    writeln!(
        out,
        "\n {BOLD}Order {}{RESET}\n Ship to: {}, {}, {}, {}\n Phone: {}",
        confirmation.order_number,
        shipping.name.trim(),
        shipping.home_address.trim(),
        shipping.province.trim(),
        shipping.country.trim(),
        shipping.phone.trim(),
    )
    .map_err(|_err| ReceiptError::IO)?;

    write_lines_table(out, &confirmation.lines)?;
    write_summary(out, &confirmation.lines)
}

fn write_lines_table(out: &mut impl io::Write, lines: &[CartLine]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Size", "Qty", "Unit Price", "Subtotal"]);

    for (index, line) in lines.iter().enumerate() {
        builder.push_record([
            format!("#{}", index + 1),
            line.product().name.clone(),
            line.size_label().to_string(),
            line.quantity().to_string(),
            format_price(line.product().price),
            format_price(line.subtotal()),
        ]);
    }

    let table_str = finish_table(builder, 3..6);

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

/// Applies the shared table theme; `numeric` columns are right-aligned.
fn finish_table(builder: Builder, numeric: Range<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Columns::first(), color_dark_grey());

    dim_borders(&table.to_string())
}

fn write_summary(out: &mut impl io::Write, lines: &[CartLine]) -> Result<(), ReceiptError> {
    let items: u64 = lines.iter().map(|line| u64::from(line.quantity())).sum();
    let total: Decimal = lines.iter().map(CartLine::subtotal).sum();

    let items = items.to_string();
    let total = format_price(total);
    let width = items.len().max(total.len());

    writeln!(
        out,
        " Items:  {items:>width$}\n {BOLD}Total:  {total:>width$}{RESET}\n"
    )
    .map_err(|_err| ReceiptError::IO)
}

fn is_border(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Dims every run of box-drawing characters, leaving cell text untouched.
fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut rest = table;

    while let Some(start) = rest.find(is_border) {
        let (text, tail) = rest.split_at(start);
        let end = tail.find(|ch: char| !is_border(ch)).unwrap_or(tail.len());
        let (run, tail) = tail.split_at(end);

        out.push_str(text);
        _ = write!(out, "{DARK_GREY}{run}{RESET}");

        rest = tail;
    }

    out.push_str(rest);

    out
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new(DARK_GREY, RESET)
}

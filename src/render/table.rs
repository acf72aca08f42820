//! Text cart page

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    notifications::{CART_UNAVAILABLE, EMPTY_CART, LOGIN_TO_VIEW},
    render::RenderError,
    view::{CartPage, CartSummary, CartView, SHIPPING_LABEL},
};

/// Write a cart page as a table followed by the summary block.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing to `out` fails.
pub fn write_page(mut out: impl io::Write, page: &CartPage) -> Result<(), RenderError> {
    match page {
        CartPage::Loaded(view) if view.is_empty() => write_message(&mut out, EMPTY_CART),
        CartPage::Loaded(view) => {
            write_table(&mut out, view)?;
            write_summary(&mut out, view.summary())
        }
        CartPage::LoginRequired => write_message(&mut out, LOGIN_TO_VIEW),
        CartPage::Unavailable => write_message(&mut out, CART_UNAVAILABLE),
    }
}

fn write_table(out: &mut impl io::Write, view: &CartView) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Produto", "Nome", "Preço un.", "Qtd", "Total", "Estoque"]);

    for line in view.lines() {
        builder.push_record([
            line.item_id.to_string(),
            line.product_id.to_string(),
            line.name.clone(),
            line.unit_price.to_string(),
            line.quantity.to_string(),
            line.total.to_string(),
            line.stock.map_or_else(|| "-".to_string(), |stock| stock.to_string()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..7), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "\n{table}").map_err(|_err| RenderError::IO)
}

fn write_summary(out: &mut impl io::Write, summary: &CartSummary) -> Result<(), RenderError> {
    let rows = [
        (" Subtotal:", summary.subtotal.to_string()),
        (" Frete:", SHIPPING_LABEL.to_string()),
        (" Total:", summary.total.to_string()),
        (" Itens:", summary.item_count.to_string()),
    ];

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")
            .map_err(|_err| RenderError::IO)?;
    }

    writeln!(out).map_err(|_err| RenderError::IO)
}

fn write_message(out: &mut impl io::Write, message: &str) -> Result<(), RenderError> {
    writeln!(out, "{message}").map_err(|_err| RenderError::IO)
}

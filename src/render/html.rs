//! HTML cart page
//!
//! Markup for the storefront cart: one card per line, the summary aside, and
//! the placeholders for empty, logged-out and failed carts. Every interpolated
//! value goes through [`Escaped`].

use std::fmt::Write;

use rustc_hash::FxHashSet;

use crate::{
    mutations::{OperationKey, OperationKind},
    notifications::{CART_UNAVAILABLE, EMPTY_CART, LOGIN_TO_VIEW},
    render::{RenderError, escape::Escaped},
    view::{CartLine, CartPage, CartSummary, CartView, SHIPPING_LABEL},
};

/// Link target of the empty cart placeholder.
pub const CATALOG_URL: &str = "/produtos";

/// Render a cart page to a string.
///
/// Controls whose operation key is in `busy` are rendered disabled.
///
/// # Errors
///
/// Returns a [`RenderError`] if writing to the buffer fails.
pub fn render_page(
    page: &CartPage,
    busy: &FxHashSet<OperationKey>,
) -> Result<String, RenderError> {
    let mut out = String::new();

    write_page(&mut out, page, busy)?;

    Ok(out)
}

/// Write a cart page into `out`.
///
/// # Errors
///
/// Returns a [`RenderError`] if writing to `out` fails.
pub fn write_page(
    out: &mut impl Write,
    page: &CartPage,
    busy: &FxHashSet<OperationKey>,
) -> Result<(), RenderError> {
    match page {
        CartPage::Loaded(view) if view.is_empty() => write_empty(out)?,
        CartPage::Loaded(view) => write_view(out, view, busy)?,
        CartPage::LoginRequired => write_placeholder(out, LOGIN_TO_VIEW)?,
        CartPage::Unavailable => write_placeholder(out, CART_UNAVAILABLE)?,
    }

    Ok(())
}

fn write_view(
    out: &mut impl Write,
    view: &CartView,
    busy: &FxHashSet<OperationKey>,
) -> Result<(), RenderError> {
    writeln!(out, r#"<section class="cart-items"><div id="cart-list">"#)?;

    for line in view.lines() {
        write_line(out, line, busy)?;
    }

    writeln!(out, "</div></section>")?;

    write_summary(out, view.summary())
}

fn write_line(
    out: &mut impl Write,
    line: &CartLine,
    busy: &FxHashSet<OperationKey>,
) -> Result<(), RenderError> {
    let is_busy = |kind| busy.contains(&OperationKey::product(kind, line.product_id));

    let dec = disabled(is_busy(OperationKind::Decrement));
    let set = disabled(is_busy(OperationKind::Set));
    let inc = disabled(is_busy(OperationKind::Increment));

    let removing = busy.contains(&OperationKey::remove(line.item_id));
    let (remove, remove_label) = if removing {
        (disabled(true), "Removendo...")
    } else {
        ("", "Remover")
    };

    let max = line
        .stock
        .map(|stock| format!(r#" max="{stock}""#))
        .unwrap_or_default();

    let name = Escaped(&line.name);

    writeln!(
        out,
        r#"<article class="cart-item-card" data-cart-item-id="{item}" data-prod-id="{product}">"#,
        item = line.item_id,
        product = line.product_id,
    )?;
    writeln!(
        out,
        r#"<img src="{image}" alt="{name}" class="item-image">"#,
        image = Escaped(&line.image),
    )?;
    writeln!(out, r#"<div class="item-details">"#)?;
    writeln!(out, r#"<h4 title="{name}">{name}</h4>"#)?;
    writeln!(
        out,
        r#"<p class="subtitle">{price} / un.</p>"#,
        price = Escaped(&line.unit_price.to_string()),
    )?;
    writeln!(out, r#"<div class="item-actions"><div class="quantity-control">"#)?;
    writeln!(
        out,
        r#"<button class="btn-qty" data-dec aria-label="Diminuir"{dec}>-</button>"#
    )?;
    writeln!(
        out,
        r#"<input type="number" value="{quantity}" min="1"{max} class="qty-input" aria-label="Quantidade"{set}>"#,
        quantity = line.quantity,
    )?;
    writeln!(
        out,
        r#"<button class="btn-qty" data-inc aria-label="Aumentar"{inc}>+</button>"#
    )?;
    writeln!(out, "</div>")?;
    writeln!(
        out,
        r#"<button class="btn-remove"{remove}>{remove_label}</button>"#
    )?;
    writeln!(out, "</div></div>")?;
    writeln!(
        out,
        r#"<div class="item-price" data-subtotal>{total}</div>"#,
        total = Escaped(&line.total.to_string()),
    )?;
    writeln!(out, "</article>")?;

    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &CartSummary) -> Result<(), RenderError> {
    writeln!(
        out,
        r#"<aside class="cart-summary" data-cart-count="{count}">"#,
        count = summary.item_count,
    )?;
    writeln!(
        out,
        r#"<div class="summary-row"><span>Subtotal</span><span id="summary-subtotal">{subtotal}</span></div>"#,
        subtotal = Escaped(&summary.subtotal.to_string()),
    )?;
    writeln!(
        out,
        r#"<div class="summary-row"><span>Frete</span><span id="summary-shipping">{SHIPPING_LABEL}</span></div>"#
    )?;
    writeln!(
        out,
        r#"<div class="summary-row total"><span>Total</span><span id="summary-total">{total}</span></div>"#,
        total = Escaped(&summary.total.to_string()),
    )?;
    writeln!(out, "</aside>")?;

    Ok(())
}

fn write_empty(out: &mut impl Write) -> Result<(), RenderError> {
    writeln!(
        out,
        r#"<div class="cart-empty"><p>{EMPTY_CART}</p><a href="{CATALOG_URL}" class="btn">Ver produtos</a></div>"#
    )?;

    Ok(())
}

fn write_placeholder(out: &mut impl Write, message: &str) -> Result<(), RenderError> {
    writeln!(
        out,
        r#"<div class="cart-empty"><p>{message}</p></div>"#,
        message = Escaped(message),
    )?;

    Ok(())
}

fn disabled(busy: bool) -> &'static str {
    if busy { " disabled" } else { "" }
}

//! Test Helpers

use petgo::{
    cart::Cart,
    items::{CartItem, CartItemId},
    pricing::brl,
    products::{ProductId, ProductSnapshot},
};

/// An open cart with `(item, product, quantity, unit price in centavos)` rows.
pub(crate) fn cart_with(rows: &[(CartItemId, ProductId, u32, i64)]) -> Cart {
    let items: Vec<CartItem> = rows
        .iter()
        .map(|&(id, product_id, quantity, unit_minor)| CartItem {
            id,
            product_id,
            quantity,
            unit_price: brl(unit_minor),
        })
        .collect();

    let reported = items
        .iter()
        .filter_map(|item| item.total().ok())
        .map(|total| total.to_minor_units())
        .sum();

    Cart {
        id: Some(1),
        status: "ABERTO".to_string(),
        items,
        reported_subtotal: brl(reported),
    }
}

/// An active R$10,00 product with the given stock.
pub(crate) fn snapshot(id: ProductId, stock: u32) -> ProductSnapshot {
    ProductSnapshot {
        id,
        name: format!("Ração {id}"),
        stock,
        image: None,
        active: true,
    }
}

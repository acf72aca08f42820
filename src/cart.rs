//! Cart

use smallvec::SmallVec;

use crate::{
    items::{CartItem, CartItemId},
    pricing::Price,
    products::ProductId,
};

/// The server-held cart, as last fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Server cart id; `None` until the first item is added
    pub id: Option<u64>,

    /// Cart status reported by the server (`ABERTO` for an open cart)
    pub status: String,

    /// Cart rows
    pub items: Vec<CartItem>,

    /// Subtotal as computed by the server
    pub reported_subtotal: Price,
}

impl Cart {
    /// Find the row holding the given product.
    pub fn item_for_product(&self, product: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product)
    }

    /// Find a row by its cart item id.
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct product ids in cart order.
    pub fn product_ids(&self) -> SmallVec<[ProductId; 8]> {
        let mut ids: SmallVec<[ProductId; 8]> = SmallVec::new();

        for item in &self.items {
            if !ids.contains(&item.product_id) {
                ids.push(item.product_id);
            }
        }

        ids
    }

    /// Check if the cart has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

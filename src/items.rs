//! Cart Items

use crate::{
    ids::TypedId,
    pricing::{Price, PricingError, line_total},
    products::ProductId,
};

/// Cart Item Id
pub type CartItemId = TypedId<CartItem>;

/// A row associating a product with a quantity within a user's cart.
///
/// The server owns this entity. The client only holds the copy from the last
/// fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Cart item id, used for deletes
    pub id: CartItemId,

    /// Product id, used for quantity changes
    pub product_id: ProductId,

    /// Units in the cart
    pub quantity: u32,

    /// Price per unit recorded when the item was last changed
    pub unit_price: Price,
}

impl CartItem {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows.
    pub fn total(&self) -> Result<Price, PricingError> {
        line_total(self.unit_price, self.quantity)
    }
}

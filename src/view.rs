//! Cart view model
//!
//! A [`CartView`] is built once per render from a fetched [`Cart`] and the
//! product snapshots resolved for it. It is immutable: every mutation produces
//! a fresh view from a fresh fetch.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::{
    cart::Cart,
    items::CartItemId,
    pricing::{Price, PricingError, brl, subtotal},
    products::{PLACEHOLDER_IMAGE, ProductId, ProductSnapshot, fallback_name},
};

/// Shipping is quoted at checkout, never in the cart.
pub const SHIPPING_LABEL: &str = "A calcular no checkout";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Cart item id (remove)
    pub item_id: CartItemId,

    /// Product id (quantity changes)
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Image URL
    pub image: String,

    /// Price per unit
    pub unit_price: Price,

    /// Units in the cart
    pub quantity: u32,

    /// `unit_price × quantity`
    pub total: Price,

    /// Stock from the product snapshot, if one was fetched
    pub stock: Option<u32>,
}

/// Cart summary block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    /// Sum of line totals
    pub subtotal: Price,

    /// Amount due before shipping
    pub total: Price,

    /// Sum of quantities, shown on the header badge
    pub item_count: u32,
}

/// Immutable render model for one pass over the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    lines: Vec<CartLine>,
    summary: CartSummary,
}

impl CartView {
    /// A view with no lines.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            summary: CartSummary {
                subtotal: brl(0),
                total: brl(0),
                item_count: 0,
            },
        }
    }

    /// Merge a cart with its product snapshots.
    ///
    /// Rows with a zero quantity are dropped. Products without a snapshot
    /// render with a fallback name and image and no stock figure.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total or the subtotal cannot be
    /// computed.
    pub fn build(
        cart: &Cart,
        snapshots: &FxHashMap<ProductId, ProductSnapshot>,
    ) -> Result<Self, PricingError> {
        let mut lines = Vec::with_capacity(cart.items.len());

        for item in &cart.items {
            if item.quantity == 0 {
                warn!(cart_item = %item.id, "dropping cart row with zero quantity");

                continue;
            }

            let snapshot = snapshots.get(&item.product_id);

            lines.push(CartLine {
                item_id: item.id,
                product_id: item.product_id,
                name: snapshot
                    .map(|product| product.name.trim())
                    .filter(|name| !name.is_empty())
                    .map_or_else(|| fallback_name(item.product_id), str::to_string),
                image: snapshot
                    .map_or(PLACEHOLDER_IMAGE, ProductSnapshot::image_or_placeholder)
                    .to_string(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total: item.total()?,
                stock: snapshot.map(|product| product.stock),
            });
        }

        let subtotal = subtotal(lines.iter().map(|line| line.total))?;

        if subtotal != cart.reported_subtotal {
            warn!(
                computed = %subtotal,
                reported = %cart.reported_subtotal,
                "cart subtotal differs from server"
            );
        }

        let item_count = lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity));

        Ok(Self {
            lines,
            summary: CartSummary {
                subtotal,
                total: subtotal,
                item_count,
            },
        })
    }

    /// Rendered rows in cart order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The row for a product, if present.
    pub fn line_for_product(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product)
    }

    /// The row with the given cart item id, if present.
    pub fn line(&self, item: CartItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item)
    }

    /// Summary block
    pub fn summary(&self) -> &CartSummary {
        &self.summary
    }

    /// Subtotal of the rendered rows
    pub fn subtotal(&self) -> Price {
        self.summary.subtotal
    }

    /// Sum of quantities
    pub fn item_count(&self) -> u32 {
        self.summary.item_count
    }

    /// Check if the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::empty()
    }
}

/// What the cart page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CartPage {
    /// The cart (possibly empty).
    Loaded(CartView),

    /// No session: "please log in" placeholder.
    LoginRequired,

    /// The cart could not be fetched.
    Unavailable,
}

impl CartPage {
    /// The view, if the cart loaded.
    pub fn view(&self) -> Option<&CartView> {
        match self {
            Self::Loaded(view) => Some(view),
            Self::LoginRequired | Self::Unavailable => None,
        }
    }
}

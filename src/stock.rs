//! Stock guard
//!
//! Best-effort client-side check against the stock seen in the last render.
//! The server still validates every mutation; this only saves a round trip
//! for requests that are certain to be refused.

use thiserror::Error;

use crate::products::ProductId;

/// A quantity request that exceeds the last-known stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
pub struct StockShortfall {
    /// Product being changed
    pub product_id: ProductId,

    /// Quantity the cart would hold after the change
    pub requested: u32,

    /// Last-known stock
    pub available: u32,
}

/// Check a resulting cart quantity against the last-known stock.
///
/// Unknown stock passes: without a snapshot there is nothing to check
/// against, and the server will refuse the request if needed.
///
/// # Errors
///
/// Returns a [`StockShortfall`] when `requested` exceeds `known_stock`.
pub fn check(
    product_id: ProductId,
    requested: u32,
    known_stock: Option<u32>,
) -> Result<(), StockShortfall> {
    match known_stock {
        Some(available) if requested > available => Err(StockShortfall {
            product_id,
            requested,
            available,
        }),
        Some(_) | None => Ok(()),
    }
}

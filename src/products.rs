//! Products

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Image shown when a product has none, or its snapshot could not be fetched.
pub const PLACEHOLDER_IMAGE: &str = "/public/img/placeholder-product.png";

/// Marker for [`ProductId`].
#[derive(Debug)]
pub struct Product;

/// Product data fetched for one render pass.
///
/// Snapshots are display and stock-gating data only. They are discarded with
/// the view they were fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Units in stock when the snapshot was taken
    pub stock: u32,

    /// Image URL, if the product has one
    pub image: Option<String>,

    /// Whether the product is still sold
    pub active: bool,
}

impl ProductSnapshot {
    /// Whether the product can currently be added to a cart.
    pub fn is_available(&self) -> bool {
        self.active && self.stock > 0
    }

    /// Image URL, falling back to the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Display name used when a product snapshot is unavailable.
pub fn fallback_name(id: ProductId) -> String {
    format!("Produto #{id}")
}

//! Cart Mutations

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{items::CartItemId, products::ProductId};

/// Server-recognized cart mutation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MutationMode {
    /// Set the quantity to an absolute value.
    Setar,

    /// Add to the current quantity, creating the row if needed.
    Incluir,

    /// Subtract from the current quantity; the server drops the row at zero.
    Remover,
}

impl MutationMode {
    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setar => "SETAR",
            Self::Incluir => "INCLUIR",
            Self::Remover => "REMOVER",
        }
    }
}

impl Display for MutationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A quantity change submitted for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartMutation {
    /// Target product
    pub product_id: ProductId,

    /// Quantity argument; always at least 1
    pub quantity: u32,

    /// How the server applies `quantity`
    pub mode: MutationMode,
}

impl CartMutation {
    /// `INCLUIR` one unit.
    pub fn increment(product_id: ProductId) -> Self {
        Self::include(product_id, 1)
    }

    /// `REMOVER` one unit.
    pub fn decrement(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
            mode: MutationMode::Remover,
        }
    }

    /// `INCLUIR` the given quantity, clamped to at least 1.
    pub fn include(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity: quantity.max(1),
            mode: MutationMode::Incluir,
        }
    }

    /// `SETAR` the given quantity, clamped to at least 1.
    pub fn set(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity: quantity.max(1),
            mode: MutationMode::Setar,
        }
    }
}

/// User intents that can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// The `+` control on a cart line
    Increment,

    /// The `-` control on a cart line
    Decrement,

    /// Typed quantity on a cart line
    Set,

    /// The remove button on a cart line
    Remove,

    /// "Add to cart" on the product page
    Add,
}

impl OperationKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Increment => "inc",
            Self::Decrement => "dec",
            Self::Set => "set",
            Self::Remove => "rm",
            Self::Add => "add",
        }
    }
}

/// Busy-marker key: operation kind plus the id it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    kind: OperationKind,
    target: u64,
}

impl OperationKey {
    /// Key for a product-targeted operation.
    pub fn product(kind: OperationKind, product: ProductId) -> Self {
        Self {
            kind,
            target: product.get(),
        }
    }

    /// Key for removing a cart item.
    pub fn remove(item: CartItemId) -> Self {
        Self {
            kind: OperationKind::Remove,
            target: item.get(),
        }
    }
}

impl Display for OperationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.kind.prefix(), self.target)
    }
}

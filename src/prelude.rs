//! PetGo prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    ids::TypedId,
    items::{CartItem, CartItemId},
    mutations::{CartMutation, MutationMode, OperationKey, OperationKind},
    notifications::{Level, Notification},
    pricing::{CURRENCY, Price, PricingError, brl, price_from_decimal},
    products::{ProductId, ProductSnapshot},
    render::RenderError,
    stock::StockShortfall,
    view::{CartLine, CartPage, CartSummary, CartView},
};

//! Cart API service.

use async_trait::async_trait;
use mockall::automock;
use petgo::{
    cart::Cart,
    items::CartItemId,
    mutations::CartMutation,
    products::{ProductId, ProductSnapshot},
};

use crate::api::errors::ApiError;

/// The storefront cart endpoints.
#[automock]
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Fetch the session's open cart.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`]: no session.
    /// - Any other [`ApiError`] on transport or server failure.
    async fn get_cart(&self) -> Result<Cart, ApiError>;

    /// Fetch a product snapshot.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`]: the product does not exist.
    /// - Any other [`ApiError`] on transport or server failure.
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, ApiError>;

    /// Apply a quantity change to the session's cart.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the server refuses or the request fails.
    async fn submit_item(&self, mutation: CartMutation) -> Result<(), ApiError>;

    /// Delete a cart row.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the server refuses or the request fails.
    async fn delete_item(&self, id: CartItemId) -> Result<(), ApiError>;
}

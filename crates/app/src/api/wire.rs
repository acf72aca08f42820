//! Wire formats
//!
//! JSON bodies exchanged with the storefront API, and their conversions into
//! domain types. Prices arrive as JSON floats in reais.

use petgo::{
    cart::Cart,
    items::{CartItem, CartItemId},
    mutations::{CartMutation, MutationMode},
    pricing::{PricingError, price_from_decimal},
    products::{ProductId, ProductSnapshot},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

const OPEN_STATUS: &str = "ABERTO";

/// `GET /api/carrinho` response body.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    /// Cart id; `null` while the user has no open cart
    pub id_cart: Option<u64>,

    /// Cart status
    #[serde(default = "open_status")]
    pub status: String,

    /// Cart rows
    #[serde(default)]
    pub items: Vec<CartItemResponse>,

    /// Server-computed subtotal in reais
    #[serde(default)]
    pub subtotal: Decimal,
}

/// One row of a [`CartResponse`].
#[derive(Debug, Deserialize)]
pub struct CartItemResponse {
    /// Cart item id
    pub id_cart_item: u64,

    /// Product id
    pub id_produto: u64,

    /// Units in the cart
    pub quantidade: i64,

    /// Price per unit in reais
    pub preco_unitario: Decimal,

    /// Soft-delete flag
    #[serde(default = "active")]
    pub is_active: bool,
}

/// `GET /api/produtos/:id` response body.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    /// Product id
    #[serde(alias = "id")]
    pub id_produto: u64,

    /// Display name
    #[serde(default)]
    pub nome: String,

    /// Units in stock
    pub estoque: i64,

    /// Image URL
    #[serde(default)]
    pub imagem: Option<String>,

    /// Whether the product is still sold
    #[serde(default = "active")]
    pub is_active: bool,
}

/// `POST /api/carrinho/items` request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemRequest {
    /// Target product
    pub id_produto: ProductId,

    /// Quantity argument
    pub quantidade: u32,

    /// Mutation mode
    pub modo: MutationMode,
}

impl From<CartMutation> for ItemRequest {
    fn from(mutation: CartMutation) -> Self {
        Self {
            id_produto: mutation.product_id,
            quantidade: mutation.quantity,
            modo: mutation.mode,
        }
    }
}

impl TryFrom<CartResponse> for Cart {
    type Error = PricingError;

    fn try_from(response: CartResponse) -> Result<Self, Self::Error> {
        let mut items = Vec::with_capacity(response.items.len());

        for row in response.items {
            if !row.is_active {
                debug!(cart_item = row.id_cart_item, "skipping inactive cart row");

                continue;
            }

            items.push(CartItem {
                id: CartItemId::new(row.id_cart_item),
                product_id: ProductId::new(row.id_produto),
                quantity: non_negative(row.quantidade),
                unit_price: price_from_decimal(row.preco_unitario)?,
            });
        }

        Ok(Self {
            id: response.id_cart,
            status: response.status,
            items,
            reported_subtotal: price_from_decimal(response.subtotal)?,
        })
    }
}

impl From<ProductResponse> for ProductSnapshot {
    fn from(response: ProductResponse) -> Self {
        Self {
            id: ProductId::new(response.id_produto),
            name: response.nome,
            stock: non_negative(response.estoque),
            image: response.imagem,
            active: response.is_active,
        }
    }
}

fn non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn open_status() -> String {
    OPEN_STATUS.to_string()
}

fn active() -> bool {
    true
}

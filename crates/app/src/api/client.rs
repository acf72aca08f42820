//! HTTP client for the storefront cart endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use petgo::{
    cart::Cart,
    items::CartItemId,
    mutations::CartMutation,
    products::{ProductId, ProductSnapshot},
};
use reqwest::{Client, Response, Url, cookie::Jar};
use tracing::debug;

use crate::api::{
    errors::ApiError,
    service::CartApi,
    wire::{CartResponse, ItemRequest, ProductResponse},
};

/// Name of the Flask session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Configuration for connecting to the storefront API.
#[derive(Debug, Clone)]
pub struct HttpCartApiConfig {
    /// Storefront base URL, e.g. `"http://localhost:5000"`.
    pub base_url: Url,

    /// Existing session cookie, either `session=<value>` or the bare value.
    pub session_cookie: Option<String>,
}

/// [`CartApi`] over HTTP with a cookie session.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    base: String,
    http: Client,
}

impl HttpCartApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: HttpCartApiConfig) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());

        if let Some(cookie) = config.session_cookie.as_deref() {
            jar.add_cookie_str(&session_cookie(cookie), &config.base_url);
        }

        let http = Client::builder().cookie_provider(jar).build()?;

        Ok(Self {
            base: config.base_url.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.base)
    }
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn get_cart(&self) -> Result<Cart, ApiError> {
        let url = self.endpoint("/carrinho");

        debug!(%url, "fetching cart");

        let response = ensure_success(self.http.get(&url).send().await?).await?;
        let parsed: CartResponse = response.json().await?;

        Ok(Cart::try_from(parsed)?)
    }

    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, ApiError> {
        let url = self.endpoint(&format!("/produtos/{id}"));

        debug!(%url, "fetching product");

        let response = ensure_success(self.http.get(&url).send().await?).await?;
        let parsed: ProductResponse = response.json().await?;

        Ok(ProductSnapshot::from(parsed))
    }

    async fn submit_item(&self, mutation: CartMutation) -> Result<(), ApiError> {
        let url = self.endpoint("/carrinho/items");

        debug!(
            %url,
            product = %mutation.product_id,
            quantity = mutation.quantity,
            mode = %mutation.mode,
            "submitting cart mutation"
        );

        let response = self
            .http
            .post(&url)
            .json(&ItemRequest::from(mutation))
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }

    async fn delete_item(&self, id: CartItemId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/carrinho/items/{id}"));

        debug!(%url, "deleting cart item");

        ensure_success(self.http.delete(&url).send().await?).await?;

        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(ApiError::from_status(status, &text))
}

fn session_cookie(value: &str) -> String {
    let value = value.trim();

    if value.contains('=') {
        value.to_string()
    } else {
        format!("{SESSION_COOKIE}={value}")
    }
}

//! Storefront API

mod client;
mod errors;
mod service;
pub mod wire;

pub use client::{HttpCartApi, HttpCartApiConfig};
pub use errors::ApiError;
pub use service::*;

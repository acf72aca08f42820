//! Renderers
//!
//! Turn a [`CartPage`](crate::view::CartPage) into output for a surface:
//! escaped HTML for the storefront page, or a text table for terminals.

use thiserror::Error;

pub mod escape;
pub mod html;
pub mod table;

/// Errors that can occur when rendering a cart page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Formatting into the output buffer failed.
    #[error(transparent)]
    Format(#[from] std::fmt::Error),

    /// IO error
    #[error("IO error")]
    IO,
}

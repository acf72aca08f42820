//! PetGo Cart
//!
//! Client-side model of the PetGo storefront cart: typed ids and prices, the
//! server-held cart, the immutable per-render [`view::CartView`], the three
//! server mutation modes, the best-effort stock guard, user notifications and
//! the HTML and text renderers.
//!
//! The crate performs no I/O; fetching and mutating the cart lives in
//! `petgo-app`.

pub mod cart;
pub mod ids;
pub mod items;
pub mod mutations;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod render;
pub mod stock;
pub mod view;

//! PetGo cart client: storefront API, mutation dispatcher and surfaces.

pub mod api;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod notifier;
pub mod observability;
pub mod surface;

#[cfg(test)]
mod test;

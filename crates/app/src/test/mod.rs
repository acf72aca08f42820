//! Test support.

mod helpers;

pub(crate) use fakes::GatedCartApi;
pub(crate) use helpers::{cart_with, snapshot};

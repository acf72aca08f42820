//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// A price in the storefront currency.
pub type Price = Money<'static, Currency>;

/// Currency every PetGo price is quoted in.
pub const CURRENCY: &Currency = iso::BRL;

/// Errors that can occur while converting or totalling prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The server sent a negative amount.
    #[error("negative amount: {0}")]
    Negative(Decimal),

    /// The amount does not fit in minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),

    /// Multiplying a unit price by a quantity overflowed.
    #[error("line total overflow: {unit_minor} x {quantity}")]
    Overflow {
        /// Unit price in minor units
        unit_minor: i64,

        /// Requested quantity
        quantity: u32,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Build a price from centavos.
pub fn brl(minor: i64) -> Price {
    Money::from_minor(minor, CURRENCY)
}

/// Convert a wire amount (reais, possibly with float noise) into a price.
///
/// The amount is rounded to centavos before conversion.
///
/// # Errors
///
/// - [`PricingError::Negative`]: the amount is below zero.
/// - [`PricingError::OutOfRange`]: the amount does not fit in minor units.
pub fn price_from_decimal(amount: Decimal) -> Result<Price, PricingError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::Negative(amount));
    }

    let minor = amount
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(PricingError::OutOfRange(amount))?;

    Ok(brl(minor))
}

/// Calculates the total for `quantity` units at `unit` price.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
pub fn line_total(unit: Price, quantity: u32) -> Result<Price, PricingError> {
    let unit_minor = unit.to_minor_units();

    unit_minor
        .checked_mul(i64::from(quantity))
        .map(|minor| Money::from_minor(minor, unit.currency()))
        .ok_or(PricingError::Overflow {
            unit_minor,
            quantity,
        })
}

/// Sums line totals. An empty iterator sums to zero.
///
/// # Errors
///
/// Returns [`PricingError::Money`] on a currency mismatch.
pub fn subtotal(lines: impl IntoIterator<Item = Price>) -> Result<Price, PricingError> {
    let total = lines
        .into_iter()
        .try_fold(brl(0), |acc, line| acc.add(line))?;

    Ok(total)
}

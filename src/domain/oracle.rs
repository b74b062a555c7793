//! Constant USD conversion placeholder for trade-record estimates.
//!
//! There is no real oracle integration. The conversion rate is a fixed
//! placeholder, kept only so trade records can carry indicative USD
//! figures, and the numbers it produces carry no accuracy guarantee.

use crate::domain::token::BASE_UNITS_PER_TOKEN;
use crate::error::EngineError;

/// Placeholder price of one whole native coin, in US cents.
pub const NATIVE_USD_CENTS: u128 = 450;

/// Base units per whole native coin.
pub const NATIVE_UNITS_PER_COIN: u128 = 100_000_000;

/// Estimates the USD value of a native-coin amount, in cents.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPrice`] if the placeholder rate is not
/// positive.
pub fn native_to_usd_cents(native_amount: u64) -> Result<u128, EngineError> {
    if NATIVE_USD_CENTS == 0 {
        return Err(EngineError::InvalidPrice);
    }
    Ok(u128::from(native_amount) * NATIVE_USD_CENTS / NATIVE_UNITS_PER_COIN)
}

/// Estimates the USD value of a token amount, in cents, by valuing it at
/// the given spot price and converting the native figure.
///
/// Saturates instead of failing on absurd magnitudes: the result is an
/// estimate, not a settlement figure.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPrice`] if the placeholder rate is not
/// positive.
pub fn token_to_usd_cents(
    token_amount: u64,
    native_price_per_whole_token: u128,
) -> Result<u128, EngineError> {
    if NATIVE_USD_CENTS == 0 {
        return Err(EngineError::InvalidPrice);
    }
    let native_value = u128::from(token_amount)
        .saturating_mul(native_price_per_whole_token)
        / u128::from(BASE_UNITS_PER_TOKEN);
    Ok(native_value.saturating_mul(NATIVE_USD_CENTS) / NATIVE_UNITS_PER_COIN)
}

//! Constant-product liquidity pool and its pricing function.
//!
//! Each token trades against the native coin through exactly one
//! [`LiquidityPool`]. Pricing follows the fee-adjusted constant-product
//! formula with a 0.3% fee retained in the pool, so the reserve product
//! never decreases across a trade. Reserves are only ever mutated through
//! the [`PoolController`] issued when the pool is seeded.

use crate::domain::address::AccountAddress;
use crate::domain::token::BASE_UNITS_PER_TOKEN;
use crate::error::EngineError;

/// Fee-adjusted input multiplier: 997/1000 keeps 0.3% in the pool.
const FEE_NUMERATOR: u128 = 997;

/// Fee denominator for the constant-product formula.
const FEE_DENOMINATOR: u128 = 1000;

/// The pool trade fee expressed in basis points.
pub const TRADE_FEE_BPS: u32 = ((FEE_DENOMINATOR - FEE_NUMERATOR) * 10_000 / FEE_DENOMINATOR) as u32;

/// Computes the output amount for a constant-product swap with a 0.3% fee.
///
/// `output = floor(input * 997 * output_reserve / (input_reserve * 1000 + input * 997))`
///
/// Pure function over 128-bit intermediates; never mutates reserves. The
/// result can be zero for dust inputs against deep reserves, and callers
/// must reject a zero output as [`EngineError::InsufficientLiquidity`]
/// instead of executing a trade that pays nothing out.
///
/// # Errors
///
/// Returns [`EngineError::ZeroAmount`] when `input_amount` is zero and
/// [`EngineError::InvalidAmount`] when the operands exceed the supported
/// 128-bit intermediate range.
pub fn get_output_amount(
    input_amount: u64,
    input_reserve: u64,
    output_reserve: u64,
) -> Result<u64, EngineError> {
    if input_amount == 0 {
        return Err(EngineError::ZeroAmount);
    }
    let effective_input = u128::from(input_amount) * FEE_NUMERATOR;
    let numerator = effective_input
        .checked_mul(u128::from(output_reserve))
        .ok_or_else(|| EngineError::InvalidAmount("trade size out of supported range".to_string()))?;
    let denominator = u128::from(input_reserve) * FEE_DENOMINATOR + effective_input;
    // The quotient is strictly below output_reserve, so it fits in u64.
    Ok((numerator / denominator) as u64)
}

/// Spot price for an arbitrary reserve pair, in native units per whole
/// token. Zero when the token side is empty.
#[must_use]
pub fn spot_price_for(token_reserve: u64, native_reserve: u64) -> u128 {
    if token_reserve == 0 {
        return 0;
    }
    u128::from(native_reserve) * u128::from(BASE_UNITS_PER_TOKEN) / u128::from(token_reserve)
}

/// Reserve pair backing one token's market against the native coin.
///
/// Reserves stay strictly positive after seeding: the pricing formula can
/// never pay out an entire reserve, and seeding requires both sides to be
/// non-zero. All mutation goes through the paired [`PoolController`].
#[derive(Debug)]
pub struct LiquidityPool {
    address: AccountAddress,
    token_address: AccountAddress,
    token_reserve: u64,
    native_reserve: u64,
}

impl LiquidityPool {
    /// Seeds a new pool for `token_address` and returns it together with
    /// the single controller capability that can move its reserves.
    ///
    /// The pool account address is derived deterministically from the
    /// token address, so callers can locate it without an index lookup.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientLiquidity`] when either initial
    /// reserve is zero: an empty side would make the pool unpriceable.
    pub fn seed(
        token_address: AccountAddress,
        token_amount: u64,
        native_amount: u64,
    ) -> Result<(Self, PoolController), EngineError> {
        if token_amount == 0 || native_amount == 0 {
            return Err(EngineError::InsufficientLiquidity);
        }
        let address = AccountAddress::derive_pool(&token_address);
        let pool = Self {
            address,
            token_address,
            token_reserve: token_amount,
            native_reserve: native_amount,
        };
        Ok((pool, PoolController { pool_address: address }))
    }

    /// Returns the pool's own account address.
    #[must_use]
    pub const fn address(&self) -> AccountAddress {
        self.address
    }

    /// Returns the address of the token this pool trades.
    #[must_use]
    pub const fn token_address(&self) -> AccountAddress {
        self.token_address
    }

    /// Returns the token-side reserve in base units.
    #[must_use]
    pub const fn token_reserve(&self) -> u64 {
        self.token_reserve
    }

    /// Returns the native-coin reserve.
    #[must_use]
    pub const fn native_reserve(&self) -> u64 {
        self.native_reserve
    }

    /// Returns the reserve product `token_reserve * native_reserve`.
    #[must_use]
    pub const fn constant_product(&self) -> u128 {
        self.token_reserve as u128 * self.native_reserve as u128
    }

    /// Returns the spot price as native units per whole token.
    ///
    /// Denormalized onto the token record after every trade so listings
    /// can show a price without touching the pool.
    #[must_use]
    pub fn spot_price(&self) -> u128 {
        spot_price_for(self.token_reserve, self.native_reserve)
    }

    /// Quotes the token output for a native-coin input against current
    /// reserves, validating everything a buy commit relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroAmount`] for a zero input,
    /// [`EngineError::InvalidAmount`] when the input would overflow the
    /// native reserve, and [`EngineError::InsufficientLiquidity`] when the
    /// computed output is zero.
    pub fn quote_native_to_token(&self, native_amount: u64) -> Result<u64, EngineError> {
        self.native_reserve
            .checked_add(native_amount)
            .ok_or_else(|| EngineError::InvalidAmount("native reserve would overflow".to_string()))?;
        let output = get_output_amount(native_amount, self.native_reserve, self.token_reserve)?;
        if output == 0 {
            return Err(EngineError::InsufficientLiquidity);
        }
        Ok(output)
    }

    /// Quotes the native-coin output for a token input against current
    /// reserves, validating everything a sell commit relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroAmount`] for a zero input,
    /// [`EngineError::InvalidAmount`] when the input would overflow the
    /// token reserve, and [`EngineError::InsufficientLiquidity`] when the
    /// computed output is zero.
    pub fn quote_token_to_native(&self, token_amount: u64) -> Result<u64, EngineError> {
        self.token_reserve
            .checked_add(token_amount)
            .ok_or_else(|| EngineError::InvalidAmount("token reserve would overflow".to_string()))?;
        let output = get_output_amount(token_amount, self.token_reserve, self.native_reserve)?;
        if output == 0 {
            return Err(EngineError::InsufficientLiquidity);
        }
        Ok(output)
    }
}

/// Capability handle authorizing reserve movement for exactly one pool.
///
/// Created once when the pool is seeded and held next to the pool inside
/// its token entry, never cloned or transferred. It exposes exactly the
/// two paired reserve updates a trade needs; there is no general-purpose
/// mutation surface. Commit methods are infallible on purpose: every
/// precondition (amount validity, overflow headroom, output bounds) is
/// checked by the quote methods before any state is touched.
#[derive(Debug)]
pub struct PoolController {
    pool_address: AccountAddress,
}

impl PoolController {
    /// Returns the address of the pool this capability controls.
    #[must_use]
    pub const fn pool_address(&self) -> AccountAddress {
        self.pool_address
    }

    /// Commits a buy: credits the native input to the pool and releases
    /// the quoted token output.
    ///
    /// `token_out` must come from [`LiquidityPool::quote_native_to_token`]
    /// against the same reserves.
    pub fn commit_buy(&self, pool: &mut LiquidityPool, native_in: u64, token_out: u64) {
        pool.native_reserve += native_in;
        pool.token_reserve -= token_out;
    }

    /// Commits a sell: credits the token input to the pool and releases
    /// the quoted native output.
    ///
    /// `native_out` must come from [`LiquidityPool::quote_token_to_native`]
    /// against the same reserves.
    pub fn commit_sell(&self, pool: &mut LiquidityPool, token_in: u64, native_out: u64) {
        pool.token_reserve += token_in;
        pool.native_reserve -= native_out;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn seeded_pool() -> (LiquidityPool, PoolController) {
        let token = AccountAddress::derive_account("pool-test-token");
        let Ok(pair) = LiquidityPool::seed(token, 950_000_000_000_000, 10_000_000) else {
            panic!("seeding failed");
        };
        pair
    }

    #[test]
    fn output_amount_matches_reference_figures() {
        let Ok(out) = get_output_amount(5_000_000, 10_000_000, 950_000_000_000_000) else {
            panic!("quote failed");
        };
        assert_eq!(out, 316_032_699_366_032);
    }

    #[test]
    fn output_amount_rejects_zero_input() {
        assert!(matches!(
            get_output_amount(0, 10_000_000, 950_000_000_000_000),
            Err(EngineError::ZeroAmount)
        ));
    }

    #[test]
    fn output_is_below_no_fee_value() {
        let Ok(with_fee) = get_output_amount(1_000_000, 10_000_000, 950_000_000_000_000) else {
            panic!("quote failed");
        };
        let no_fee = 1_000_000_u128 * 950_000_000_000_000 / (10_000_000_u128 + 1_000_000);
        assert!(u128::from(with_fee) < no_fee);
    }

    #[test]
    fn output_never_exhausts_reserve() {
        let Ok(out) = get_output_amount(u64::MAX / 1000, 1, 1_000_000) else {
            panic!("quote failed");
        };
        assert!(out < 1_000_000);
    }

    #[test]
    fn seed_rejects_empty_sides() {
        let token = AccountAddress::derive_account("pool-test-token");
        assert!(LiquidityPool::seed(token, 0, 10).is_err());
        assert!(LiquidityPool::seed(token, 10, 0).is_err());
    }

    #[test]
    fn quote_rejects_dust_input_with_zero_output() {
        let (pool, _controller) = seeded_pool();
        // One native unit in the other direction: huge token reserve means
        // a single token base unit buys nothing.
        assert!(matches!(
            pool.quote_token_to_native(1),
            Err(EngineError::InsufficientLiquidity)
        ));
    }

    #[test]
    fn spot_price_scales_to_whole_tokens() {
        let (pool, _controller) = seeded_pool();
        // 10_000_000 native / 950_000 whole tokens, floored.
        assert_eq!(pool.spot_price(), 10);
    }

    #[test]
    fn commit_buy_updates_reserves_exactly() {
        let (mut pool, controller) = seeded_pool();
        let Ok(out) = pool.quote_native_to_token(5_000_000) else {
            panic!("quote failed");
        };
        controller.commit_buy(&mut pool, 5_000_000, out);
        assert_eq!(pool.native_reserve(), 15_000_000);
        assert_eq!(pool.token_reserve(), 950_000_000_000_000 - 316_032_699_366_032);
    }

    #[test]
    fn reserve_product_never_decreases_across_trades() {
        let (mut pool, controller) = seeded_pool();
        let mut k = pool.constant_product();
        let inputs = [1_000_000_u64, 37, 5_000_000, 123_456, 999_999_999];
        for input in inputs {
            let Ok(out) = pool.quote_native_to_token(input) else {
                panic!("quote failed");
            };
            controller.commit_buy(&mut pool, input, out);
            let next = pool.constant_product();
            assert!(next >= k);
            k = next;
        }
        // And back the other way.
        let tokens_held = 316_032_699_366_032_u64;
        let Ok(native_out) = pool.quote_token_to_native(tokens_held) else {
            panic!("quote failed");
        };
        controller.commit_sell(&mut pool, tokens_held, native_out);
        assert!(pool.constant_product() >= k);
    }

    #[test]
    fn quote_then_commit_round_trip_preserves_value_bounds() {
        let (mut pool, controller) = seeded_pool();
        let native_in = 2_500_000_u64;
        let Ok(tokens) = pool.quote_native_to_token(native_in) else {
            panic!("buy quote failed");
        };
        controller.commit_buy(&mut pool, native_in, tokens);
        let Ok(native_back) = pool.quote_token_to_native(tokens) else {
            panic!("sell quote failed");
        };
        // Round trip pays two fees, so it always returns less than it cost.
        assert!(native_back < native_in);
    }
}

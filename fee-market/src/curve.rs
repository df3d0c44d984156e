//! The exponential price curve.
//!
//! ```text
//! height(x)  = exp(x × xscale)
//! price(x,g) = (height(x + g') - height(x)) / g' / yscale      g' = max(g, 1)
//! ```
//!
//! `price` is the discrete derivative of the curve over the purchased
//! amount, i.e. the average per-gas cost of moving the excess from `x` to
//! `x + g'`. Every division truncates toward zero, so quotes are biased low.

use {
    crate::{
        config::CurveScales,
        error::FeeError,
        fixed_point::{self, MAX_EXP_INPUT},
    },
    alloy_primitives::U256,
};

/// Largest gas excess whose scaled value is still a valid exponent input.
#[inline]
pub fn max_evaluable_excess(xscale: u128) -> U256 {
    if xscale == 0 {
        return U256::MAX;
    }
    U256::from(MAX_EXP_INPUT - 1) / U256::from(xscale)
}

/// Height of the curve at `gas_excess`.
///
/// The exponential's domain bound is checked here so that an oversized
/// excess surfaces as [`FeeError::ExcessTooLarge`] rather than as an
/// evaluator overflow.
pub fn curve_height(xscale: u128, gas_excess: U256) -> Result<U256, FeeError> {
    let too_large = || FeeError::ExcessTooLarge {
        gas_excess,
        limit: max_evaluable_excess(xscale),
    };
    let x = gas_excess
        .checked_mul(U256::from(xscale))
        .ok_or_else(too_large)?;
    if x >= U256::from(MAX_EXP_INPUT) {
        return Err(too_large());
    }
    fixed_point::exp(x)
}

/// Per-gas price for buying `gas_to_buy` at `gas_excess`.
///
/// A zero purchase is priced as a purchase of one unit, which keeps the
/// slope meaningful for empty blocks.
pub fn price(scales: &CurveScales, gas_excess: U256, gas_to_buy: U256) -> Result<U256, FeeError> {
    if scales.yscale == 0 {
        return Err(FeeError::invalid_config("yscale must be > 0"));
    }
    let effective = if gas_to_buy.is_zero() {
        U256::from(1u8)
    } else {
        gas_to_buy
    };

    let end = gas_excess.checked_add(effective).ok_or(FeeError::ExcessTooLarge {
        gas_excess: U256::MAX,
        limit: max_evaluable_excess(scales.xscale),
    })?;
    let before = curve_height(scales.xscale, gas_excess)?;
    let after = curve_height(scales.xscale, end)?;
    let pool_delta = after.checked_sub(before).ok_or(FeeError::Overflow)?;

    Ok(pool_delta / effective / U256::from(scales.yscale))
}

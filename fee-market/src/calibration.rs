//! Configuration-time derivation of the curve-shape constants.
//!
//! Given the domain ceiling, a target price at the neutral point and a
//! target per-block gas, [`calibrate`] derives `(xscale, yscale)` and then
//! checks that the derived curve reproduces the expected price ratio
//! between a `2 × target` block and a `target` block. The check goes
//! through the same [`curve::price`] the hot path uses.

use {
    crate::{
        config::CurveScales,
        curve,
        error::FeeError,
        fixed_point::MAX_EXP_INPUT,
    },
    alloy_primitives::U256,
    borsh::{BorshDeserialize, BorshSerialize},
    log::*,
    serde::{Deserialize, Serialize},
};

/// Basis-point denominator of the 2x/1x ratio.
pub const RATIO_DENOMINATOR: u64 = 10_000;

/// Economic targets the curve is calibrated against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct CalibrationTarget {
    /// Domain ceiling for the gas excess.
    pub gas_excess_max: u64,
    /// Desired base fee per gas at the neutral point for a `target` block.
    pub price: u64,
    /// Target gas per block.
    pub target: u64,
    /// Expected `price(2 × target) × 10_000 / price(target)`.
    pub ratio_2x_1x: u64,
}

impl CalibrationTarget {
    /// Neutral point of the calibrated domain.
    #[inline]
    pub fn midpoint(&self) -> u64 {
        self.gas_excess_max / 2
    }
}

/// Derive `(xscale, yscale)` for `target` and verify the 2x/1x ratio.
///
/// Fails with [`FeeError::CalibrationMismatch`] when the derived constants
/// do not reproduce `target.ratio_2x_1x` exactly.
pub fn calibrate(target: &CalibrationTarget) -> Result<CurveScales, FeeError> {
    if target.gas_excess_max == 0 {
        return Err(FeeError::invalid_config("gas_excess_max must be > 0"));
    }
    if target.price == 0 {
        return Err(FeeError::invalid_config("target price must be > 0"));
    }

    let xscale = MAX_EXP_INPUT / u128::from(target.gas_excess_max);
    let yscale = solve_yscale(xscale, target)?;
    let scales = CurveScales { xscale, yscale };

    let actual = measure_ratio(&scales, target.gas_excess_max, target.target)?;
    if actual != target.ratio_2x_1x {
        warn!(
            "AMM fee market calibration rejected: expected ratio {} got {actual} ({target:?})",
            target.ratio_2x_1x
        );
        return Err(FeeError::CalibrationMismatch {
            expected: target.ratio_2x_1x,
            actual,
        });
    }

    debug!("AMM fee market calibrated: xscale={xscale} yscale={yscale} ({target:?})");
    Ok(scales)
}

/// Two-phase solve for `yscale`.
///
/// Phase one prices a `target` block at the midpoint with the desired
/// `price` standing in as the divisor. The quotient is the curve slope in
/// units of `price`, which is exactly the `yscale` that makes the same
/// purchase cost `price` per gas in phase two.
fn solve_yscale(xscale: u128, target: &CalibrationTarget) -> Result<u128, FeeError> {
    let provisional = CurveScales {
        xscale,
        yscale: u128::from(target.price),
    };
    let solved = curve::price(
        &provisional,
        U256::from(target.midpoint()),
        U256::from(target.target),
    )?;

    if solved.is_zero() {
        return Err(FeeError::invalid_config(format!(
            "derived yscale is zero for target price {}",
            target.price
        )));
    }
    u128::try_from(solved)
        .map_err(|_| FeeError::invalid_config(format!("derived yscale {solved} exceeds 128 bits")))
}

/// Price ratio, in basis points, between a `2 × target` and a `target`
/// purchase at the midpoint of `[0, gas_excess_max]`.
pub fn measure_ratio(
    scales: &CurveScales,
    gas_excess_max: u64,
    target: u64,
) -> Result<u64, FeeError> {
    let midpoint = U256::from(gas_excess_max / 2);
    let target = U256::from(target);

    let price_1x = curve::price(scales, midpoint, target)?;
    let price_2x = curve::price(scales, midpoint, target * U256::from(2u8))?;
    if price_1x.is_zero() {
        return Err(FeeError::invalid_config(
            "price of a target block rounds to zero",
        ));
    }

    let ratio = price_2x
        .checked_mul(U256::from(RATIO_DENOMINATOR))
        .ok_or(FeeError::Overflow)?
        / price_1x;
    Ok(ratio.saturating_to())
}

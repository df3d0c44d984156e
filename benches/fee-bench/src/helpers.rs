//! Shared helpers for fee-market benchmarks.

use amm_fee_market::{CalibrationTarget, CurveParameters, ExcessState};

/// Seconds between simulated blocks.
pub const BLOCK_TIME: u64 = 12;

/// Gas per block that exactly offsets the reference issuance.
pub fn issuance_per_block(params: &CurveParameters) -> u64 {
    params.gas_issue_per_second.saturating_mul(BLOCK_TIME)
}

/// Reference state at the neutral point.
pub fn neutral_state(params: &CurveParameters) -> ExcessState {
    ExcessState::neutral(params, 0)
}

/// Gas used by block `height` under an alternating busy/light load.
pub fn alternating_gas(params: &CurveParameters, height: u64) -> u64 {
    let target = issuance_per_block(params);
    if height % 2 == 1 {
        target.saturating_mul(3) / 2
    } else {
        target / 3
    }
}

/// The calibration target the reference constants' domain is built around.
pub fn reference_calibration_target() -> CalibrationTarget {
    CalibrationTarget {
        gas_excess_max: 90_900_000_000,
        price: 1_000_000_000,
        target: 150_000_000,
        ratio_2x_1x: 11_250,
    }
}

//! Fuzz the AMM fee curve, excess state machine and calibrator.
//!
//! Goals:
//! - Find panics, overflows, underflows, or division-by-zero.
//! - Verify that a committed excess never leaves [0, gas_excess_max].
//! - Verify that a failed transition leaves the state untouched.
//! - Verify that quotes and commits agree bit for bit.

#![no_main]

use {
    alloy_primitives::U256,
    amm_fee_market::{
        calculator::{advance, quote},
        calibration::{calibrate, measure_ratio, CalibrationTarget},
        config::CurveParameters,
        curve, fixed_point,
        state::ExcessState,
        FeeError,
    },
    arbitrary::Arbitrary,
    libfuzzer_sys::fuzz_target,
};

/// Fuzz input: random curve parameters, state and a block sequence.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    // Parameters
    xscale: u128,
    yscale: u128,
    gas_excess_max: u128,
    gas_issue_per_second: u64,

    // State
    gas_excess: u128,
    last_update_timestamp: u64,

    // Blocks: (seconds since previous block, gas used)
    blocks: Vec<(u16, u32)>,

    // Raw exponential input
    exp_input: u128,

    // Calibration
    calibration: (u64, u64, u64, u64),
}

fuzz_target!(|input: FuzzInput| {
    // ── Test 1: exp never panics ──

    match fixed_point::exp(U256::from(input.exp_input)) {
        Ok(_) => assert!(input.exp_input < fixed_point::MAX_EXP_INPUT),
        Err(FeeError::DomainOverflow { .. }) => {
            assert!(input.exp_input >= fixed_point::MAX_EXP_INPUT)
        }
        Err(err) => panic!("unexpected exp error {err:?}"),
    }

    // ── Test 2: pricing with arbitrary scales never panics ──

    let params = CurveParameters {
        xscale: input.xscale,
        yscale: input.yscale,
        gas_excess_max: input.gas_excess_max,
        gas_issue_per_second: input.gas_issue_per_second,
    };
    let _ = curve::price(
        &params.scales(),
        U256::from(input.gas_excess),
        U256::from(input.blocks.first().map_or(0, |b| b.1)),
    );

    // ── Test 3: block sequence over valid parameters ──

    if params.validate().is_ok() && input.gas_excess <= params.gas_excess_max {
        let mut state = ExcessState {
            gas_excess: input.gas_excess,
            last_update_timestamp: input.last_update_timestamp,
        };
        let mut now = input.last_update_timestamp;

        for &(dt, gas) in input.blocks.iter().take(64) {
            now = now.saturating_add(u64::from(dt));
            let before = state;
            let quoted = quote(&state, &params, now, u64::from(gas));
            let committed = advance(&mut state, &params, now, u64::from(gas));
            assert_eq!(quoted, committed);

            match committed {
                Ok(_) => {
                    assert!(state.gas_excess <= params.gas_excess_max);
                    assert_eq!(state.last_update_timestamp, now);
                }
                Err(_) => assert_eq!(state, before),
            }
        }
    }

    // ── Test 4: calibration never panics and never accepts a wrong ratio ──

    let (gas_excess_max, price, target, ratio_2x_1x) = input.calibration;
    let target = CalibrationTarget {
        gas_excess_max,
        price,
        target,
        ratio_2x_1x,
    };
    if let Ok(scales) = calibrate(&target) {
        assert_eq!(
            measure_ratio(&scales, target.gas_excess_max, target.target),
            Ok(target.ratio_2x_1x)
        );
    }
});

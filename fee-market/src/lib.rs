//! # AMM Fee Market
//!
//! A **continuous, AMM-style variant of EIP-1559**. Instead of stepping the
//! base fee up or down by a bounded fraction each block, the fee is read off
//! a smooth exponential curve parameterized by an accumulated **gas excess**:
//!
//! - every second, `gas_issue_per_second` gas is "issued" and the excess
//!   decays by that amount (never below zero);
//! - every block, the gas it used is added to the excess;
//! - the base fee is the discrete derivative of `exp(excess × xscale)` over
//!   the block's gas, divided by `yscale`.
//!
//! All arithmetic is integer-only (WAD fixed point over 256-bit words), so a
//! transition re-executed anywhere produces bit-identical fees.
//!
//! ## Quick start
//!
//! ```rust
//! use amm_fee_market::{calculator, CurveParameters, ExcessState};
//!
//! let params = CurveParameters::default();
//! let mut state = ExcessState::neutral(&params, 0);
//!
//! // Twelve seconds later a block used 15 M gas.
//! let quote = calculator::advance(&mut state, &params, 12, 15_000_000).unwrap();
//! assert_eq!(quote.base_fee_per_gas_u64(), 826_834_162);
//! assert_eq!(state.gas_excess, 45_315_000_000);
//! ```
//!
//! The curve constants are derived offline with [`calibration::calibrate`];
//! hosts drive the engine through [`oracle::BaseFeeOracle`].

pub mod calculator;
pub mod calibration;
pub mod config;
pub mod curve;
pub mod error;
pub mod fixed_point;
pub mod oracle;
pub mod state;


// Re-exports for convenience.
pub use {
    calibration::CalibrationTarget,
    config::{CurveParameters, CurveScales},
    error::FeeError,
    oracle::{BaseFeeOracle, FeeEvent, FeeEventSink, NoopSink},
    state::{ExcessState, PriceQuote},
};

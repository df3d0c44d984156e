//! AMM Fee Market Property-Based Invariant Tests
//!
//! Uses proptest to verify the pricing engine's invariants:
//! - Fee monotonicity in gas used
//! - Excess decay saturation and domain rejection
//! - Quote / commit equivalence
//! - Calibration round-trip

pub mod calibration_invariants;

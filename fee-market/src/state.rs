use {
    crate::config::CurveParameters,
    alloy_primitives::U256,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// The gas-excess state of one deployment.
///
/// Excess and timestamp always move together: a committed transition
/// replaces the whole value, so a host persisting it as a single record
/// can never observe one without the other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct ExcessState {
    /// Accumulated demand above the issuance rate, in gas.
    /// Stays within `[0, gas_excess_max]` after every committed transition.
    pub gas_excess: u128,

    /// Host timestamp (seconds) of the last committed transition.
    pub last_update_timestamp: u64,
}

impl ExcessState {
    /// Fresh state at the curve's neutral point.
    pub fn neutral(params: &CurveParameters, now: u64) -> Self {
        Self {
            gas_excess: params.neutral_excess(),
            last_update_timestamp: now,
        }
    }
}

/// Result of one pricing transition. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Full-width base fee per gas.
    pub base_fee_per_gas: U256,
    /// Gas excess after decay and the purchase.
    pub new_gas_excess: U256,
}

impl PriceQuote {
    /// Base fee narrowed to the public 64-bit width, saturating at `u64::MAX`.
    #[inline]
    pub fn base_fee_per_gas_u64(&self) -> u64 {
        self.base_fee_per_gas.saturating_to()
    }

    /// New excess narrowed to the stored 128-bit width, saturating at
    /// `u128::MAX`.
    #[inline]
    pub fn new_gas_excess_u128(&self) -> u128 {
        self.new_gas_excess.saturating_to()
    }

    /// The state a host commits for this quote at `now`.
    pub fn into_state(self, now: u64) -> ExcessState {
        ExcessState {
            gas_excess: self.new_gas_excess_u128(),
            last_update_timestamp: now,
        }
    }
}

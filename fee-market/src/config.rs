use {
    crate::{calibration::CalibrationTarget, error::FeeError, fixed_point::MAX_EXP_INPUT},
    alloy_primitives::U256,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Reference `xscale`: `MAX_EXP_INPUT / 90_900_000_000`.
pub const DEFAULT_XSCALE: u128 = 1_488_514_844;
/// Reference `yscale`.
pub const DEFAULT_YSCALE: u128 = 358_298_803_609_133_338_138_868_404_779;
/// Reference issuance: gas the excess decays by per elapsed second.
pub const DEFAULT_GAS_ISSUE_PER_SECOND: u64 = 12_500_000;
/// Reference domain ceiling for the gas excess.
pub const DEFAULT_GAS_EXCESS_MAX: u128 = 90_900_000_000;

/// The two curve-shape constants.
///
/// Produced by [`crate::calibration::calibrate`] and thereafter part of
/// [`CurveParameters`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct CurveScales {
    /// Input compression: gas excess is multiplied by this before it is fed
    /// to the WAD exponential.
    pub xscale: u128,
    /// Output normalization: the curve's discrete derivative is divided by
    /// this to obtain a per-gas price.
    pub yscale: u128,
}

/// Immutable configuration of the exponential fee curve.
///
/// Configured once at deployment; shared read-only by the pricing curve,
/// the excess state machine and the calibrator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct CurveParameters {
    /// See [`CurveScales::xscale`].
    pub xscale: u128,

    /// See [`CurveScales::yscale`].
    pub yscale: u128,

    /// Domain ceiling for the gas excess. `gas_excess_max × xscale` must
    /// stay below [`MAX_EXP_INPUT`].
    pub gas_excess_max: u128,

    /// Gas issued (decayed from the excess) per elapsed second.
    pub gas_issue_per_second: u64,
}

impl CurveParameters {
    /// Assemble parameters from calibrated scales.
    pub fn from_scales(scales: CurveScales, gas_excess_max: u128, gas_issue_per_second: u64) -> Self {
        Self {
            xscale: scales.xscale,
            yscale: scales.yscale,
            gas_excess_max,
            gas_issue_per_second,
        }
    }

    /// Calibrate scales against `target` and assemble validated parameters.
    pub fn calibrated(target: &CalibrationTarget, gas_issue_per_second: u64) -> Result<Self, FeeError> {
        let scales = crate::calibration::calibrate(target)?;
        let params = Self::from_scales(
            scales,
            u128::from(target.gas_excess_max),
            gas_issue_per_second,
        );
        params.validate()?;
        Ok(params)
    }

    /// The curve-shape constants alone, as the pricing curve consumes them.
    #[inline]
    pub fn scales(&self) -> CurveScales {
        CurveScales {
            xscale: self.xscale,
            yscale: self.yscale,
        }
    }

    /// The curve's neutral point, where a fresh deployment starts.
    #[inline]
    pub fn neutral_excess(&self) -> u128 {
        self.gas_excess_max / 2
    }

    /// Check that the parameters are internally consistent and that the
    /// whole `[0, gas_excess_max]` domain is evaluable.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.xscale == 0 {
            return Err(FeeError::invalid_config("xscale must be > 0"));
        }
        if self.yscale == 0 {
            return Err(FeeError::invalid_config("yscale must be > 0"));
        }
        if self.gas_excess_max == 0 {
            return Err(FeeError::invalid_config("gas_excess_max must be > 0"));
        }
        let top = U256::from(self.gas_excess_max) * U256::from(self.xscale);
        if top >= U256::from(MAX_EXP_INPUT) {
            return Err(FeeError::invalid_config(format!(
                "gas_excess_max ({}) × xscale ({}) = {top} reaches the exponential limit {MAX_EXP_INPUT}",
                self.gas_excess_max, self.xscale
            )));
        }
        Ok(())
    }
}

impl Default for CurveParameters {
    /// Reference deployment constants.
    fn default() -> Self {
        Self {
            xscale: DEFAULT_XSCALE,
            yscale: DEFAULT_YSCALE,
            gas_excess_max: DEFAULT_GAS_EXCESS_MAX,
            gas_issue_per_second: DEFAULT_GAS_ISSUE_PER_SECOND,
        }
    }
}

use {alloy_primitives::U256, thiserror::Error};

/// Errors produced by the AMM fee-market subsystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// The fixed-point exponential was asked to evaluate an input at or
    /// above [`crate::fixed_point::MAX_EXP_INPUT`], or its result could not
    /// be represented in 256 bits.
    #[error("Exponential domain overflow: input {input} is outside the evaluable range")]
    DomainOverflow { input: U256 },

    /// A gas excess (current or post-purchase) is beyond what the curve or
    /// the configured `gas_excess_max` accepts. The transition is aborted
    /// and no state is changed.
    #[error("Gas excess too large: {gas_excess} exceeds the limit of {limit}")]
    ExcessTooLarge { gas_excess: U256, limit: U256 },

    /// Derived scale constants do not reproduce the expected 2x/1x price
    /// ratio (basis points).
    #[error("Calibration mismatch: expected 2x/1x ratio {expected}, derived {actual}")]
    CalibrationMismatch { expected: u64, actual: u64 },

    /// The configuration is invalid (e.g. zero domain maximum, zero scale).
    #[error("Invalid fee market configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The caller is not the designated base-fee updater.
    #[error("Caller is not authorized to update the base fee")]
    Unauthorized,

    /// The oracle has not been initialized yet.
    #[error("Base fee oracle is not initialized")]
    NotInitialized,

    /// `initialize` was called on an already initialized oracle.
    #[error("Base fee oracle is already initialized")]
    AlreadyInitialized,

    /// Arithmetic overflow or a non-monotone curve segment during pricing.
    #[error("Fee calculation overflow")]
    Overflow,
}

impl FeeError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

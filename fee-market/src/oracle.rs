//! Host-facing base-fee oracle.
//!
//! Wraps the excess state machine with the three public entry points a
//! host runtime calls: `initialize` once, `update_base_fee` once per block
//! from the designated updater, and `quote_base_fee` from anyone.
//!
//! The host supplies `now` and serializes calls. Persistence of the state
//! and delivery of [`FeeEvent`]s are left to the host: the oracle exposes
//! the state as a single [`ExcessState`] record and hands events to a
//! [`FeeEventSink`].

use {
    crate::{
        calculator,
        config::CurveParameters,
        error::FeeError,
        state::ExcessState,
    },
    alloy_primitives::Address,
    log::*,
    serde::{Deserialize, Serialize},
};

/// Notifications emitted by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeEvent {
    /// The oracle was initialized at the neutral excess.
    Initialized {
        base_fee_per_gas: u64,
        gas_excess: u128,
        timestamp: u64,
    },
    /// A block's gas was committed and a new base fee took effect.
    BaseFeeUpdated {
        base_fee_per_gas: u64,
        gas_excess: u128,
        timestamp: u64,
    },
}

/// Receiver of [`FeeEvent`]s.
pub trait FeeEventSink {
    fn emit(&mut self, event: FeeEvent);
}

impl FeeEventSink for Vec<FeeEvent> {
    fn emit(&mut self, event: FeeEvent) {
        self.push(event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl FeeEventSink for NoopSink {
    fn emit(&mut self, _event: FeeEvent) {}
}

/// Base-fee oracle for a single deployment.
#[derive(Debug)]
pub struct BaseFeeOracle<S: FeeEventSink = NoopSink> {
    params: CurveParameters,
    updater: Address,
    state: Option<ExcessState>,
    sink: S,
}

impl<S: FeeEventSink> BaseFeeOracle<S> {
    /// Create an uninitialized oracle. `params` are validated here.
    pub fn new(params: CurveParameters, updater: Address, sink: S) -> Result<Self, FeeError> {
        params.validate()?;
        Ok(Self {
            params,
            updater,
            state: None,
            sink,
        })
    }

    /// Resume an oracle from a previously persisted state.
    pub fn with_state(
        params: CurveParameters,
        updater: Address,
        state: ExcessState,
        sink: S,
    ) -> Result<Self, FeeError> {
        let mut oracle = Self::new(params, updater, sink)?;
        if state.gas_excess > params.gas_excess_max {
            return Err(FeeError::invalid_config(format!(
                "persisted gas_excess {} exceeds gas_excess_max {}",
                state.gas_excess, params.gas_excess_max
            )));
        }
        oracle.state = Some(state);
        Ok(oracle)
    }

    /// Set the excess to the curve's neutral point and emit the initial fee,
    /// priced as a one-gas purchase at `now`.
    pub fn initialize(&mut self, now: u64) -> Result<u64, FeeError> {
        if self.state.is_some() {
            return Err(FeeError::AlreadyInitialized);
        }
        let state = ExcessState::neutral(&self.params, now);
        let base_fee_per_gas = calculator::transition(&state, &self.params, 0, 1)?.base_fee_per_gas_u64();

        self.state = Some(state);
        info!(
            "AMM fee market initialized: timestamp={now} base_fee={base_fee_per_gas} gas_excess={}",
            state.gas_excess
        );
        self.sink.emit(FeeEvent::Initialized {
            base_fee_per_gas,
            gas_excess: state.gas_excess,
            timestamp: now,
        });
        Ok(base_fee_per_gas)
    }

    /// Commit `gas_used` for the block at `now` and return the new base fee.
    ///
    /// Only the designated updater may call this. On any error the state
    /// is unchanged and no event is emitted.
    pub fn update_base_fee(&mut self, caller: Address, now: u64, gas_used: u32) -> Result<u64, FeeError> {
        if caller != self.updater {
            warn!("AMM fee market: unauthorized update from {caller}");
            return Err(FeeError::Unauthorized);
        }
        let state = self.state.as_mut().ok_or(FeeError::NotInitialized)?;

        let quote = calculator::advance(state, &self.params, now, u64::from(gas_used))?;
        let base_fee_per_gas = quote.base_fee_per_gas_u64();
        let ExcessState {
            gas_excess,
            last_update_timestamp: timestamp,
        } = *state;

        info!(
            "AMM fee market: timestamp={timestamp} base_fee={base_fee_per_gas} (gas_used={gas_used}, gas_excess={gas_excess})"
        );
        self.sink.emit(FeeEvent::BaseFeeUpdated {
            base_fee_per_gas,
            gas_excess,
            timestamp,
        });
        Ok(base_fee_per_gas)
    }

    /// Base fee `update_base_fee(_, now, gas_used)` would return, without
    /// committing anything.
    pub fn quote_base_fee(&self, now: u64, gas_used: u32) -> Result<u64, FeeError> {
        let state = self.state.as_ref().ok_or(FeeError::NotInitialized)?;
        calculator::quote(state, &self.params, now, u64::from(gas_used))
            .map(|quote| quote.base_fee_per_gas_u64())
    }

    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    pub fn updater(&self) -> Address {
        self.updater
    }

    /// Current committed state, `None` before `initialize`.
    pub fn state(&self) -> Option<&ExcessState> {
        self.state.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

use {
    crate::{
        config::CurveParameters,
        curve,
        error::FeeError,
        state::{ExcessState, PriceQuote},
    },
    alloy_primitives::U256,
    log::*,
};

/// Decay `gas_excess` by the gas `issued` since the last update.
///
/// Saturates at zero: when more gas was issued than had accumulated, the
/// excess is simply empty.
#[inline]
pub fn decay_excess(gas_excess: u128, issued: u128) -> u128 {
    gas_excess.max(issued) - issued
}

/// Seconds elapsed since the last committed transition.
///
/// A host clock that runs backwards is treated as zero elapsed time.
pub fn elapsed_since(state: &ExcessState, now: u64) -> u64 {
    if now < state.last_update_timestamp {
        warn!(
            "AMM fee market: clock went backwards (now={now}, last_update={})",
            state.last_update_timestamp
        );
    }
    now.saturating_sub(state.last_update_timestamp)
}

/// Compute the next excess and base fee without touching `state`.
///
/// # Formula
///
/// ```text
/// issued      = gas_issue_per_second × elapsed_seconds
/// decayed     = max(gas_excess, issued) - issued
/// new_excess  = decayed + gas_to_buy                 (must be <= gas_excess_max)
/// base_fee    = curve::price(scales, new_excess, gas_to_buy)
/// ```
///
/// An excess above `gas_excess_max` is rejected, never clamped: clamping
/// would understate real demand.
pub fn transition(
    state: &ExcessState,
    params: &CurveParameters,
    elapsed_seconds: u64,
    gas_to_buy: u64,
) -> Result<PriceQuote, FeeError> {
    // u64 × u64 always fits in u128.
    let issued = u128::from(params.gas_issue_per_second) * u128::from(elapsed_seconds);
    let decayed = decay_excess(state.gas_excess, issued);

    let new_gas_excess = U256::from(decayed) + U256::from(gas_to_buy);
    let max = U256::from(params.gas_excess_max);
    if new_gas_excess > max {
        return Err(FeeError::ExcessTooLarge {
            gas_excess: new_gas_excess,
            limit: max,
        });
    }

    let base_fee_per_gas = curve::price(&params.scales(), new_gas_excess, U256::from(gas_to_buy))?;

    Ok(PriceQuote {
        base_fee_per_gas,
        new_gas_excess,
    })
}

/// Read-only fee estimate at `now`.
///
/// Shares every step with [`advance`], so a quote followed by an advance at
/// the same `now` with the same gas yields the same fee.
pub fn quote(
    state: &ExcessState,
    params: &CurveParameters,
    now: u64,
    gas_to_buy: u64,
) -> Result<PriceQuote, FeeError> {
    let elapsed = elapsed_since(state, now);
    let quote = transition(state, params, elapsed, gas_to_buy)?;
    debug!(
        "AMM fee market quote: now={now} gas={gas_to_buy} base_fee={} excess={}",
        quote.base_fee_per_gas, quote.new_gas_excess
    );
    Ok(quote)
}

/// Run the transition at `now` and commit it.
///
/// On success `state` is replaced in a single assignment with the new
/// excess (narrowed to 128 bits) and the later of `now` and the previous
/// update time, so a backwards clock never rewinds the timestamp. On
/// failure `state` is left exactly as it was.
pub fn advance(
    state: &mut ExcessState,
    params: &CurveParameters,
    now: u64,
    gas_to_buy: u64,
) -> Result<PriceQuote, FeeError> {
    let elapsed = elapsed_since(state, now);
    let quote = match transition(state, params, elapsed, gas_to_buy) {
        Ok(quote) => quote,
        Err(err) => {
            warn!(
                "AMM fee market: rejected transition (excess={}, elapsed={elapsed}, gas={gas_to_buy}): {err}",
                state.gas_excess
            );
            return Err(err);
        }
    };
    *state = quote.into_state(now.max(state.last_update_timestamp));
    Ok(quote)
}

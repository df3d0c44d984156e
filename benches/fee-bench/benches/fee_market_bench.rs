//! Fee Market benchmarks.
//!
//! Measures:
//! - Fixed-point exponential throughput
//! - Curve pricing throughput
//! - Excess transition (quote and commit)
//! - Scale calibration
//! - Multi-block fee adjustment simulation

use {
    alloy_primitives::U256,
    amm_fee_bench::helpers::{
        alternating_gas, issuance_per_block, neutral_state, reference_calibration_target,
        BLOCK_TIME,
    },
    amm_fee_market::{calculator, calibration, curve, fixed_point, CurveParameters},
    criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    std::hint::black_box,
};

// ---------------------------------------------------------------------------
// Fixed-point exponential
// ---------------------------------------------------------------------------

fn bench_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_market/exp");
    group.throughput(Throughput::Elements(1));

    for (name, x) in [
        ("zero", U256::ZERO),
        ("one", U256::from(fixed_point::WAD)),
        ("neutral", U256::from(67_652_999_659_800_000_000u128)),
        ("near_max", U256::from(fixed_point::MAX_EXP_INPUT - 1)),
    ] {
        group.bench_function(name, |b| b.iter(|| fixed_point::exp(black_box(x))));
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Curve pricing
// ---------------------------------------------------------------------------

fn bench_curve_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_market/curve");
    let scales = CurveParameters::default().scales();
    let neutral = U256::from(45_450_000_000u64);
    group.throughput(Throughput::Elements(1));

    group.bench_function("empty_block", |b| {
        b.iter(|| curve::price(&scales, black_box(neutral), U256::ZERO))
    });

    group.bench_function("target_block", |b| {
        b.iter(|| curve::price(&scales, black_box(neutral), U256::from(150_000_000u64)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Excess transition
// ---------------------------------------------------------------------------

fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_market/transition");
    let params = CurveParameters::default();
    let gas = issuance_per_block(&params);
    group.throughput(Throughput::Elements(1));

    group.bench_function("quote", |b| {
        let state = neutral_state(&params);
        b.iter(|| calculator::quote(&state, &params, black_box(BLOCK_TIME), gas))
    });

    group.bench_function("advance", |b| {
        b.iter(|| {
            let mut state = neutral_state(&params);
            calculator::advance(&mut state, &params, black_box(BLOCK_TIME), gas)
        })
    });

    // Rejected transition (expect Err)
    group.bench_function("rejected", |b| {
        let state = amm_fee_market::ExcessState {
            gas_excess: params.gas_excess_max,
            last_update_timestamp: 0,
        };
        b.iter(|| {
            let _ = calculator::transition(&state, &params, 0, black_box(1));
        })
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------

fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_market/calibration");
    let target = reference_calibration_target();

    group.bench_function("reference", |b| {
        b.iter(|| calibration::calibrate(black_box(&target)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Multi-block simulation
// ---------------------------------------------------------------------------

fn bench_multi_block_fee_adjustment(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_market/multi_block_simulation");

    for &n_blocks in &[100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n_blocks));
        group.bench_with_input(
            BenchmarkId::new("blocks", n_blocks),
            &n_blocks,
            |b, &n| {
                let params = CurveParameters::default();

                b.iter(|| {
                    let mut state = neutral_state(&params);

                    for height in 1..=n {
                        // Odd blocks are busy, even blocks are light.
                        let gas = alternating_gas(&params, height);
                        let now = height.saturating_mul(BLOCK_TIME);
                        black_box(calculator::advance(&mut state, &params, now, gas)).ok();
                    }

                    state
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exp,
    bench_curve_price,
    bench_transition,
    bench_calibration,
    bench_multi_block_fee_adjustment,
);
criterion_main!(benches);

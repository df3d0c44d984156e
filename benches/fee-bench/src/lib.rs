//! AMM Fee Market Benchmark Suite
//!
//! Run all benchmarks:
//! ```bash
//! cargo bench -p amm-fee-bench
//! ```
//!
//! Run a specific benchmark group:
//! ```bash
//! cargo bench -p amm-fee-bench --bench fee_market_bench -- fee_market/curve
//! ```

pub mod helpers;

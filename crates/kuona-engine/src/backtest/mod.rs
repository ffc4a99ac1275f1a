//! Cross-sectional event study over many earnings calls

pub mod aggregator;

pub use aggregator::{BacktestSummary, BucketStats, run_backtest};

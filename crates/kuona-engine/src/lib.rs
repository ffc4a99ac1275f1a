//! Earnings-call feature extraction and event-study backtesting
//!
//! This crate turns earnings-call transcripts into numeric features and joins
//! them with forward stock returns. It includes:
//!
//! - Sentence segmentation and lexicon-based sentiment/uncertainty scoring
//! - Daily close retrieval from Yahoo Finance behind a TTL cache and rate limiter
//! - Forward-return alignment anchored on the call date
//! - A cross-sectional backtest correlating sentiment with returns
//! - Registry tools wrapping the single-event, bulk and backtest operations
//!
//! # Example
//!
//! ```rust,ignore
//! use kuona_engine::{EarningsService, EngineConfig, InMemoryTranscriptStore, YahooPriceProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::builder().with_env().build()?;
//!     let prices = YahooPriceProvider::new(config.rate_limit_per_minute)?;
//!     let store = InMemoryTranscriptStore::with_sample_data();
//!
//!     let service = EarningsService::new(Arc::new(store), Arc::new(prices), config)?;
//!     let date = kuona_engine::parse_call_date("2025-01-28")?;
//!     let row = service.feature_row("AAPL", date).await?;
//!     println!("{}", serde_json::to_string_pretty(&row)?);
//!
//!     Ok(())
//! }
//! ```

pub mod backtest;
pub mod config;
pub mod error;
pub mod event;
pub mod prices;
pub mod returns;
pub mod scoring;
pub mod service;
pub mod stats;
pub mod store;
pub mod text;
pub mod tools;

pub use backtest::{BacktestSummary, BucketStats, run_backtest};
pub use config::{EngineConfig, EngineConfigBuilder, parse_horizons};
pub use error::{EngineError, ErrorKind, Result};
pub use event::{Event, EventRow};
pub use prices::{CachedPriceProvider, PriceBar, PriceProvider, PriceSeries, YahooPriceProvider};
pub use returns::{ReturnAligner, ReturnSet, align_returns};
pub use scoring::{FeatureVector, Lexicon, SentimentScorer, compute_features};
pub use service::{BacktestReport, EarningsService, parse_call_date};
pub use store::{InMemoryTranscriptStore, Transcript, TranscriptFilter, TranscriptStore, parse_tickers};
pub use tools::register_tools;

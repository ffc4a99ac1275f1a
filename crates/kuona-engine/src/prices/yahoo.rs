//! Yahoo Finance price provider

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use super::{PriceBar, PriceProvider, PriceSeries};
use crate::error::{EngineError, Result};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Daily closes from Yahoo Finance
///
/// Closes are unadjusted. Bars are keyed by the UTC calendar date of their
/// timestamp, which for US listings is the trading session date.
pub struct YahooPriceProvider {
    connector: yahoo::YahooConnector,
    rate_limiter: SharedRateLimiter,
}

impl YahooPriceProvider {
    /// Create a provider allowing `rate_limit` requests per minute
    pub fn new(rate_limit: u32) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| EngineError::PriceProvider(e.to_string()))?;
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            connector,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }
}

fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| EngineError::PriceProvider(format!("Invalid date {date}: {e}")))
}

#[async_trait]
impl PriceProvider for YahooPriceProvider {
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let start_odt = to_offset_datetime(start)?;
        let end_odt = to_offset_datetime(end)?;

        self.rate_limiter.until_ready().await;
        tracing::debug!(ticker, %start, %end, "Requesting Yahoo price history");

        let response = self
            .connector
            .get_quote_history(ticker, start_odt, end_odt)
            .await
            .map_err(|e| EngineError::PriceProvider(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| EngineError::PriceProvider(e.to_string()))?;

        let bars: Vec<PriceBar> = quotes
            .iter()
            .filter(|q| q.close.is_finite() && q.close > 0.0)
            .filter_map(|q| {
                let timestamp = i64::try_from(q.timestamp).ok()?;
                let date = DateTime::from_timestamp(timestamp, 0)?.date_naive();
                Some(PriceBar::new(date, q.close))
            })
            .collect();

        if bars.len() < quotes.len() {
            tracing::debug!(
                ticker,
                dropped = quotes.len() - bars.len(),
                "Dropped Yahoo quotes without a usable close"
            );
        }

        Ok(PriceSeries::new(bars))
    }
}

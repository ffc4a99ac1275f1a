//! Alignment of a call date to a trading-day price series
//!
//! The day-0 anchor is the first close on or after the call date. A horizon of
//! `h` days targets the first close on or after `call_date + h`, so weekends
//! and holidays roll forward to the next session.

use chrono::{Days, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::prices::{PriceProvider, PriceSeries};

/// Simple returns keyed by horizon in days
///
/// Every requested horizon has an entry; `None` means the price data did not
/// reach far enough. Values are always finite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnSet {
    returns: BTreeMap<u32, Option<f64>>,
}

impl ReturnSet {
    /// Return for `horizon`, if requested and available
    pub fn get(&self, horizon: u32) -> Option<f64> {
        self.returns.get(&horizon).copied().flatten()
    }

    /// Whether `horizon` was requested
    pub fn contains_horizon(&self, horizon: u32) -> bool {
        self.returns.contains_key(&horizon)
    }

    /// Requested horizons in ascending order
    pub fn horizons(&self) -> impl Iterator<Item = u32> + '_ {
        self.returns.keys().copied()
    }

    /// `(horizon, return)` pairs in ascending horizon order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<f64>)> + '_ {
        self.returns.iter().map(|(h, r)| (*h, *r))
    }

    /// Field name used for a horizon in serialized rows
    pub fn field_name(horizon: u32) -> String {
        format!("return_{horizon}d")
    }
}

impl FromIterator<(u32, Option<f64>)> for ReturnSet {
    fn from_iter<I: IntoIterator<Item = (u32, Option<f64>)>>(iter: I) -> Self {
        Self {
            returns: iter
                .into_iter()
                .map(|(h, r)| (h, r.filter(|v| v.is_finite())))
                .collect(),
        }
    }
}

impl Serialize for ReturnSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.returns.len()))?;
        for (horizon, value) in &self.returns {
            map.serialize_entry(&Self::field_name(*horizon), value)?;
        }
        map.end()
    }
}

/// Date window `[call_date, call_date + max(horizons) + buffer_days]` to request
pub fn price_window(call_date: NaiveDate, horizons: &[u32], buffer_days: u32) -> (NaiveDate, NaiveDate) {
    let max_horizon = horizons.iter().copied().max().unwrap_or(0);
    let span = u64::from(max_horizon) + u64::from(buffer_days);
    let end = call_date
        .checked_add_days(Days::new(span))
        .unwrap_or(NaiveDate::MAX);
    (call_date, end)
}

/// Compute forward simple returns from an already fetched series
///
/// Returns `None` when the series has no close on or after `call_date`.
/// Horizons resolve independently: one missing target leaves the others intact.
pub fn align_returns(series: &PriceSeries, call_date: NaiveDate, horizons: &[u32]) -> Option<ReturnSet> {
    let anchor = series.first_on_or_after(call_date)?;
    let p0 = anchor.close;

    let returns = horizons
        .iter()
        .map(|&h| {
            let value = call_date
                .checked_add_days(Days::new(u64::from(h)))
                .and_then(|target| series.first_on_or_after(target))
                .map(|bar| (bar.close - p0) / p0);
            (h, value)
        })
        .collect();

    Some(returns)
}

/// Fetches prices for a call and aligns forward returns
#[derive(Clone)]
pub struct ReturnAligner {
    provider: Arc<dyn PriceProvider>,
    buffer_days: u32,
}

impl ReturnAligner {
    pub fn new(provider: Arc<dyn PriceProvider>, buffer_days: u32) -> Self {
        Self {
            provider,
            buffer_days,
        }
    }

    /// Forward returns for `ticker` around `call_date`
    ///
    /// Provider failures and empty windows both yield `None`; the request is
    /// not retried.
    pub async fn returns_for(&self, ticker: &str, call_date: NaiveDate, horizons: &[u32]) -> Option<ReturnSet> {
        let (start, end) = price_window(call_date, horizons, self.buffer_days);

        let series = match self.provider.fetch(ticker, start, end).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(ticker, %call_date, error = %e, "Price data unavailable");
                return None;
            }
        };

        if series.is_empty() {
            tracing::debug!(ticker, %start, %end, "Provider returned no prices");
            return None;
        }

        align_returns(&series, call_date, horizons)
    }
}

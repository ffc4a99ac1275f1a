//! Daily closing-price series and the providers that supply them

pub mod cache;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use cache::CachedPriceProvider;
pub use yahoo::YahooPriceProvider;

/// One trading day's closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes in ascending date order
///
/// Serialized as a plain array of bars; deserialization sorts through
/// [`PriceSeries::new`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting bars by date
    ///
    /// The sort is stable, so of two bars sharing a date the first supplied
    /// stays first.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First bar dated on or after `date`
    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&PriceBar> {
        let idx = self.bars.partition_point(|bar| bar.date < date);
        self.bars.get(idx)
    }
}

impl From<Vec<PriceBar>> for PriceSeries {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

impl FromIterator<PriceBar> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceBar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source of daily closing prices
///
/// `end` is exclusive. An empty series is a valid answer meaning the provider
/// has nothing for the window.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_series_is_sorted() {
        let series = PriceSeries::new(vec![
            PriceBar::new(day(3), 99.0),
            PriceBar::new(day(1), 100.0),
            PriceBar::new(day(2), 102.0),
        ]);
        let dates: Vec<_> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_deserialized_series_is_sorted() {
        let raw = r#"[
            {"date": "2025-01-09", "close": 99.0},
            {"date": "2025-01-06", "close": 100.0},
            {"date": "2025-01-07", "close": 102.0}
        ]"#;
        let series: PriceSeries = serde_json::from_str(raw).unwrap();
        let anchor = series.first_on_or_after(day(6)).unwrap();
        assert_eq!(anchor.date, day(6));
        assert_eq!(anchor.close, 100.0);

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json[0]["date"], "2025-01-06");
        assert_eq!(json[2]["date"], "2025-01-09");
    }

    #[test]
    fn test_first_on_or_after() {
        let series: PriceSeries = [
            PriceBar::new(day(6), 100.0),
            PriceBar::new(day(7), 101.0),
            PriceBar::new(day(10), 103.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(series.first_on_or_after(day(1)).unwrap().date, day(6));
        assert_eq!(series.first_on_or_after(day(7)).unwrap().date, day(7));
        assert_eq!(series.first_on_or_after(day(8)).unwrap().date, day(10));
        assert!(series.first_on_or_after(day(11)).is_none());
        assert!(PriceSeries::default().first_on_or_after(day(1)).is_none());
    }
}

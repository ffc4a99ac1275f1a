//! Events and their serialized row form

use chrono::NaiveDate;
use serde::Serialize;

use crate::returns::ReturnSet;
use crate::scoring::FeatureVector;

/// One transcript joined with its features and forward returns
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub ticker: String,
    pub call_date: NaiveDate,
    pub features: FeatureVector,
    /// `None` when no price data could be aligned at all
    pub returns: Option<ReturnSet>,
}

impl Event {
    /// Return for `horizon`, if one was computed
    pub fn return_for(&self, horizon: u32) -> Option<f64> {
        self.returns.as_ref().and_then(|r| r.get(horizon))
    }

    /// Flatten into a row whose return columns cover `horizons`
    ///
    /// Horizons missing from the event's return set appear as null columns, so
    /// every row produced for the same request has the same shape.
    pub fn to_row(&self, horizons: &[u32]) -> EventRow {
        let returns = horizons
            .iter()
            .map(|&h| (h, self.return_for(h)))
            .collect();

        EventRow {
            ticker: self.ticker.clone(),
            call_date: self.call_date,
            token_count: self.features.token_count,
            sentiment_mean: self.features.sentiment_mean,
            sentiment_std: self.features.sentiment_std,
            uncertainty_score: self.features.uncertainty_score,
            returns,
        }
    }
}

/// Flat, serializable form of an [`Event`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    pub ticker: String,
    pub call_date: NaiveDate,
    pub token_count: usize,
    pub sentiment_mean: f64,
    pub sentiment_std: f64,
    pub uncertainty_score: f64,
    /// Serialized as `return_{h}d` columns
    #[serde(flatten)]
    pub returns: ReturnSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(returns: Option<ReturnSet>) -> Event {
        Event {
            ticker: "AAPL".to_string(),
            call_date: NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
            features: FeatureVector {
                token_count: 9,
                sentiment_mean: 0.25,
                sentiment_std: 0.25,
                uncertainty_score: 0.2,
            },
            returns,
        }
    }

    #[test]
    fn test_row_shape() {
        let returns: ReturnSet = [(1, Some(0.02)), (3, None)].into_iter().collect();
        let row = event(Some(returns)).to_row(&[1, 3, 5]);
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["call_date"], "2025-01-28");
        assert_eq!(value["token_count"], 9);
        assert_eq!(value["sentiment_mean"], 0.25);
        assert_eq!(value["return_1d"], 0.02);
        assert!(value["return_3d"].is_null());
        assert!(value["return_5d"].is_null());
    }

    #[test]
    fn test_row_without_prices() {
        let row = event(None).to_row(&[1, 3]);
        assert_eq!(row.returns.get(1), None);
        assert!(row.returns.contains_horizon(3));
    }
}

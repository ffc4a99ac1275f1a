//! Sentiment-versus-return aggregation
//!
//! Events without a return at the chosen horizon are dropped before any
//! statistic is computed. The remaining events are sorted by
//! `sentiment_mean` (stable, so equal sentiments keep input order) and split
//! at `floor(n / 2)`: the low bucket takes the first half and the high bucket
//! takes the rest, including the extra element when `n` is odd.

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::event::Event;
use crate::stats;

/// Count and mean return of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BucketStats {
    pub count: usize,
    pub avg_return: Option<f64>,
}

impl BucketStats {
    fn from_returns(returns: &[f64]) -> Self {
        Self {
            count: returns.len(),
            avg_return: stats::mean(returns),
        }
    }
}

/// Aggregate statistics for one backtest run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacktestSummary {
    /// Events with a return at the chosen horizon
    pub events_count: usize,
    /// Pearson correlation of sentiment_mean against return
    pub correlation: Option<f64>,
    pub low_bucket: BucketStats,
    pub high_bucket: BucketStats,
}

/// Summarize sentiment against `horizon`-day returns
///
/// Fails with [`EngineError::NoUsableEvents`] when no event has a return at
/// `horizon`.
pub fn run_backtest(events: &[Event], horizon: u32) -> Result<BacktestSummary> {
    let mut pairs: Vec<(f64, f64)> = events
        .iter()
        .filter_map(|e| e.return_for(horizon).map(|r| (e.features.sentiment_mean, r)))
        .collect();

    if pairs.is_empty() {
        return Err(EngineError::NoUsableEvents { horizon });
    }

    let (sentiments, returns): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    let correlation = stats::pearson_correlation(&sentiments, &returns);

    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mid = pairs.len() / 2;
    let (low, high) = pairs.split_at(mid);

    let low_returns: Vec<f64> = low.iter().map(|p| p.1).collect();
    let high_returns: Vec<f64> = high.iter().map(|p| p.1).collect();

    let summary = BacktestSummary {
        events_count: pairs.len(),
        correlation,
        low_bucket: BucketStats::from_returns(&low_returns),
        high_bucket: BucketStats::from_returns(&high_returns),
    };

    tracing::debug!(
        horizon,
        events = summary.events_count,
        dropped = events.len() - summary.events_count,
        correlation = ?summary.correlation,
        "Backtest aggregated"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::ReturnSet;
    use crate::scoring::FeatureVector;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-12;

    fn event(ticker: &str, sentiment: f64, ret3: Option<f64>) -> Event {
        Event {
            ticker: ticker.to_string(),
            call_date: NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
            features: FeatureVector {
                token_count: 10,
                sentiment_mean: sentiment,
                ..Default::default()
            },
            returns: Some([(1, Some(0.0)), (3, ret3)].into_iter().collect::<ReturnSet>()),
        }
    }

    #[test]
    fn test_no_usable_events() {
        let events = vec![event("A", 0.1, None), event("B", 0.2, None)];
        let err = run_backtest(&events, 3).unwrap_err();
        assert!(matches!(err, EngineError::NoUsableEvents { horizon: 3 }));

        assert!(run_backtest(&[], 3).is_err());
    }

    #[test]
    fn test_events_without_returns_are_excluded() {
        let mut no_prices = event("C", 0.9, None);
        no_prices.returns = None;
        let events = vec![
            event("A", 0.1, Some(0.01)),
            event("B", 0.2, None),
            no_prices,
            event("D", 0.3, Some(0.03)),
        ];
        let summary = run_backtest(&events, 3).unwrap();
        assert_eq!(summary.events_count, 2);
        assert_eq!(summary.low_bucket.count, 1);
        assert_eq!(summary.high_bucket.count, 1);
        assert!((summary.low_bucket.avg_return.unwrap() - 0.01).abs() < EPS);
        assert!((summary.high_bucket.avg_return.unwrap() - 0.03).abs() < EPS);
    }

    #[test]
    fn test_perfect_correlation() {
        let events: Vec<Event> = (0..5_u32)
            .map(|i| event("T", f64::from(i) * 0.1, Some(f64::from(i) * 0.02 - 0.03)))
            .collect();
        let summary = run_backtest(&events, 3).unwrap();
        assert!((summary.correlation.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_event_has_no_correlation() {
        let summary = run_backtest(&[event("A", 0.5, Some(0.02))], 3).unwrap();
        assert_eq!(summary.events_count, 1);
        assert_eq!(summary.correlation, None);
        assert_eq!(summary.low_bucket, BucketStats { count: 0, avg_return: None });
        assert_eq!(summary.high_bucket.count, 1);
        assert!((summary.high_bucket.avg_return.unwrap() - 0.02).abs() < EPS);
    }

    #[test]
    fn test_constant_sentiment_has_no_correlation() {
        let events = vec![
            event("A", 0.2, Some(0.01)),
            event("B", 0.2, Some(0.05)),
            event("C", 0.2, Some(-0.02)),
        ];
        assert_eq!(run_backtest(&events, 3).unwrap().correlation, None);

        let events = vec![
            event("A", 0.1, Some(0.0)),
            event("B", 0.1, Some(0.01)),
            event("C", 0.1, Some(0.02)),
        ];
        let summary = run_backtest(&events, 3).unwrap();
        assert_eq!(summary.correlation, None);
        assert_eq!(summary.low_bucket.avg_return, Some(0.0));
    }

    #[test]
    fn test_median_split_size_law() {
        for n in 1..=9_u32 {
            let events: Vec<Event> = (0..n)
                .map(|i| event("T", f64::from(i).sin(), Some(f64::from(i) / 100.0)))
                .collect();
            let summary = run_backtest(&events, 3).unwrap();
            let n = n as usize;
            assert_eq!(summary.low_bucket.count, n / 2);
            assert_eq!(summary.high_bucket.count, n - n / 2);
            assert_eq!(summary.low_bucket.count + summary.high_bucket.count, n);
        }
    }

    #[test]
    fn test_split_sorts_by_sentiment() {
        let events = vec![
            event("HI", 0.9, Some(0.10)),
            event("LO", -0.5, Some(-0.04)),
            event("MID", 0.1, Some(0.02)),
            event("LO2", -0.2, Some(-0.02)),
        ];
        let summary = run_backtest(&events, 3).unwrap();
        assert!((summary.low_bucket.avg_return.unwrap() + 0.03).abs() < EPS);
        assert!((summary.high_bucket.avg_return.unwrap() - 0.06).abs() < EPS);
    }

    #[test]
    fn test_ties_split_by_input_order() {
        // All four share a sentiment; the first two in input order go low
        let events = vec![
            event("A", 0.0, Some(0.01)),
            event("B", 0.0, Some(0.03)),
            event("C", 0.0, Some(0.05)),
            event("D", 0.0, Some(0.07)),
        ];
        let summary = run_backtest(&events, 3).unwrap();
        assert!((summary.low_bucket.avg_return.unwrap() - 0.02).abs() < EPS);
        assert!((summary.high_bucket.avg_return.unwrap() - 0.06).abs() < EPS);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let events = vec![event("B", 0.9, Some(0.1)), event("A", -0.9, Some(-0.1))];
        let before = events.clone();
        run_backtest(&events, 3).unwrap();
        assert_eq!(events, before);
    }
}

//! Engine operations exposed as registry tools

pub mod backtest;
pub mod bulk;
pub mod features;

use kuona_tools::ToolRegistry;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::service::{EarningsService, parse_call_date};
use crate::store::{TranscriptFilter, parse_tickers};

pub use backtest::BacktestTool;
pub use bulk::BulkFeaturesTool;
pub use features::FeaturesTool;

/// Register every engine tool against `registry`
pub fn register_tools(registry: &ToolRegistry, service: Arc<EarningsService>) {
    registry.register(Arc::new(FeaturesTool::new(Arc::clone(&service))));
    registry.register(Arc::new(BulkFeaturesTool::new(Arc::clone(&service))));
    registry.register(Arc::new(BacktestTool::new(service)));
}

/// Listing parameters shared by the bulk and backtest tools
#[derive(Debug, Default, Deserialize)]
struct FilterParams {
    /// Comma separated ticker list
    #[serde(default)]
    tickers: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl FilterParams {
    fn to_filter(&self) -> Result<TranscriptFilter> {
        Ok(TranscriptFilter {
            tickers: self.tickers.as_deref().and_then(parse_tickers),
            start_date: self.start_date.as_deref().map(parse_call_date).transpose()?,
            end_date: self.end_date.as_deref().map(parse_call_date).transpose()?,
        })
    }
}

fn filter_schema_properties() -> serde_json::Map<String, serde_json::Value> {
    let schema = serde_json::json!({
        "tickers": {
            "type": "string",
            "description": "Comma separated tickers (e.g. 'AAPL,MSFT'); all tickers when omitted"
        },
        "start_date": {
            "type": "string",
            "format": "date",
            "description": "Earliest call date, inclusive (YYYY-MM-DD)"
        },
        "end_date": {
            "type": "string",
            "format": "date",
            "description": "Latest call date, inclusive (YYYY-MM-DD)"
        }
    });
    match schema {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_tools() {
        let registry = ToolRegistry::new();
        register_tools(&registry, test_support::service());
        assert_eq!(
            registry.names(),
            vec!["earnings_backtest", "earnings_features", "earnings_features_bulk"]
        );

        let out = tokio_test::block_on(registry.execute(
            "earnings_features",
            json!({"ticker": "MSFT", "call_date": "2025-01-13"}),
        ))
        .unwrap();
        assert_eq!(out["features"][0]["ticker"], "MSFT");
    }

    #[test]
    fn test_filter_params() {
        let params: FilterParams = serde_json::from_value(json!({
            "tickers": "msft, aapl",
            "start_date": "2025-01-01"
        }))
        .unwrap();
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.tickers, Some(vec!["AAPL".to_string(), "MSFT".to_string()]));
        assert_eq!(filter.start_date, Some(test_support::date(2025, 1, 1)));
        assert_eq!(filter.end_date, None);

        let params = FilterParams {
            end_date: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(params.to_filter().is_err());
    }
}

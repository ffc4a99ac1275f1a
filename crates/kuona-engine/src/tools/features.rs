//! Tool returning the feature row for one earnings call

use async_trait::async_trait;
use kuona_tools::{Result as ToolResult, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::Result;
use crate::service::{EarningsService, parse_call_date};

/// Features and forward returns for a single `(ticker, call_date)`
pub struct FeaturesTool {
    service: Arc<EarningsService>,
}

#[derive(Debug, Deserialize)]
struct FeaturesParams {
    ticker: String,
    call_date: String,
}

impl FeaturesTool {
    pub fn new(service: Arc<EarningsService>) -> Self {
        Self { service }
    }

    async fn run(&self, params: FeaturesParams) -> Result<Value> {
        let call_date = parse_call_date(&params.call_date)?;
        let row = self.service.feature_row(&params.ticker, call_date).await?;
        Ok(json!({ "features": [row] }))
    }
}

#[async_trait]
impl Tool for FeaturesTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: FeaturesParams = serde_json::from_value(params)?;
        Ok(self.run(params).await?)
    }

    fn name(&self) -> &'static str {
        "earnings_features"
    }

    fn description(&self) -> &'static str {
        "Sentiment, uncertainty and forward returns for one earnings call. \
         Returns a single-row feature table."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL')"
                },
                "call_date": {
                    "type": "string",
                    "format": "date",
                    "description": "Earnings call date (YYYY-MM-DD)"
                }
            },
            "required": ["ticker", "call_date"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support;
    use kuona_tools::ToolError;

    #[tokio::test]
    async fn test_single_row() {
        let tool = FeaturesTool::new(test_support::service());
        let out = tool
            .execute(json!({"ticker": "aapl", "call_date": "2025-01-06"}))
            .await
            .unwrap();

        let rows = out["features"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ticker"], "AAPL");
        assert_eq!(rows[0]["call_date"], "2025-01-06");
        assert_eq!(rows[0]["token_count"], 4);
        assert!((rows[0]["return_1d"].as_f64().unwrap() - 0.1).abs() < 1e-9);
        assert!(rows[0].get("return_5d").is_some());
    }

    #[tokio::test]
    async fn test_unpriced_row_has_null_returns() {
        let tool = FeaturesTool::new(test_support::service());
        let out = tool
            .execute(json!({"ticker": "IBM", "call_date": "2025-01-20"}))
            .await
            .unwrap();
        let row = &out["features"][0];
        assert!(row["return_1d"].is_null());
        assert!(row["return_3d"].is_null());
        assert!(row["return_5d"].is_null());
    }

    #[tokio::test]
    async fn test_errors_map_to_tool_outcomes() {
        let tool = FeaturesTool::new(test_support::service());

        let err = tool
            .execute(json!({"ticker": "AAPL", "call_date": "2025-01-07"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));

        let err = tool
            .execute(json!({"ticker": "AAPL", "call_date": "Jan 6"}))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());

        let err = tool.execute(json!({"ticker": "AAPL"})).await.unwrap_err();
        assert!(err.is_invalid_input());
    }
}

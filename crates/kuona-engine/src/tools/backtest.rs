//! Tool running the sentiment-versus-return event study

use async_trait::async_trait;
use kuona_tools::{Result as ToolResult, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{FilterParams, filter_schema_properties};
use crate::error::Result;
use crate::service::EarningsService;

/// Correlation and low/high bucket returns across the selected calls
pub struct BacktestTool {
    service: Arc<EarningsService>,
}

#[derive(Debug, Default, Deserialize)]
struct BacktestParams {
    #[serde(flatten)]
    filter: FilterParams,
    /// Return horizon in days; the configured default when omitted
    #[serde(default)]
    horizon: Option<u32>,
}

impl BacktestTool {
    pub fn new(service: Arc<EarningsService>) -> Self {
        Self { service }
    }

    async fn run(&self, params: BacktestParams) -> Result<Value> {
        let filter = params.filter.to_filter()?;
        let report = self.service.backtest(&filter, params.horizon).await?;
        Ok(serde_json::to_value(report)?)
    }
}

#[async_trait]
impl Tool for BacktestTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: BacktestParams = if params.is_null() {
            BacktestParams::default()
        } else {
            serde_json::from_value(params)?
        };
        Ok(self.run(params).await?)
    }

    fn name(&self) -> &'static str {
        "earnings_backtest"
    }

    fn description(&self) -> &'static str {
        "Correlate call sentiment with forward returns at one horizon. \
         Returns the correlation and average returns of the low- and high-sentiment halves."
    }

    fn input_schema(&self) -> Value {
        let mut properties = filter_schema_properties();
        properties.insert(
            "horizon".to_string(),
            json!({
                "type": "integer",
                "minimum": 1,
                "description": "Return horizon in calendar days (default 3)"
            }),
        );
        json!({
            "type": "object",
            "properties": properties
        })
    }
}

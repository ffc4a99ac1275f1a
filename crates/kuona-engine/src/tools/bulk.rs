//! Tool returning feature rows for many earnings calls

use async_trait::async_trait;
use kuona_tools::{Result as ToolResult, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

use super::{FilterParams, filter_schema_properties};
use crate::error::Result;
use crate::service::EarningsService;

/// Feature rows for every stored call matching the filters
pub struct BulkFeaturesTool {
    service: Arc<EarningsService>,
}

impl BulkFeaturesTool {
    pub fn new(service: Arc<EarningsService>) -> Self {
        Self { service }
    }

    async fn run(&self, params: FilterParams) -> Result<Value> {
        let filter = params.to_filter()?;
        let rows = self.service.bulk_rows(&filter).await?;
        Ok(json!({ "count": rows.len(), "features": rows }))
    }
}

#[async_trait]
impl Tool for BulkFeaturesTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: FilterParams = if params.is_null() {
            FilterParams::default()
        } else {
            serde_json::from_value(params)?
        };
        Ok(self.run(params).await?)
    }

    fn name(&self) -> &'static str {
        "earnings_features_bulk"
    }

    fn description(&self) -> &'static str {
        "Feature rows for all stored earnings calls, optionally filtered by \
         tickers and an inclusive call-date range. Rows are ordered by ticker, then date."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": filter_schema_properties()
        })
    }
}

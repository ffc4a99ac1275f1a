//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for named JSON operations
///
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a single-event lookup:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" },
    ///         "call_date": { "type": "string", "format": "date" }
    ///     },
    ///     "required": ["ticker", "call_date"]
    /// });
    /// assert_eq!(schema["type"], "object");
    /// ```
    fn input_schema(&self) -> Value;
}

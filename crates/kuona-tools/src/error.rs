//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool operations
///
/// The variants carry the request-level outcome: callers translate
/// `NotFound` and `InvalidInput` into their own not-found and bad-request
/// responses.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Parameters were malformed or the request cannot be satisfied as asked
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No tool registered under the given name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Whether the failure is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnknownTool(_))
    }

    /// Whether the failure is a bad-request outcome
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("Invalid parameters: {err}"))
    }
}

//! Error types for the earnings engine

use chrono::NaiveDate;
use thiserror::Error;

/// Request-level outcome of a failure
///
/// Front ends map these onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested transcript or event set does not exist
    NotFound,
    /// The request was malformed or cannot produce a result as asked
    BadRequest,
    /// An upstream collaborator could not supply data
    Unavailable,
    /// Anything else
    Internal,
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// No transcript stored for the ticker/date pair
    #[error("No transcript found for {ticker} on {call_date}")]
    TranscriptNotFound {
        ticker: String,
        call_date: NaiveDate,
    },

    /// The listing filters matched no transcripts
    #[error("No events found for the given filters")]
    NoEvents,

    /// Every event lacked a return for the backtest horizon
    #[error("No events had valid {horizon}d returns for backtest")]
    NoUsableEvents {
        horizon: u32,
    },

    /// Date string was not `YYYY-MM-DD`
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Any other malformed request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Price provider failure
    #[error("Price provider error: {0}")]
    PriceProvider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Filesystem error while loading transcripts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Classify this error into a request-level outcome
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TranscriptNotFound { .. } | Self::NoEvents => ErrorKind::NotFound,
            Self::NoUsableEvents { .. } | Self::InvalidDate(_) | Self::InvalidParameter(_) => {
                ErrorKind::BadRequest
            }
            Self::PriceProvider(_) => ErrorKind::Unavailable,
            Self::ConfigError(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Convert EngineError to the tool-level error, preserving the outcome
impl From<EngineError> for kuona_tools::ToolError {
    fn from(err: EngineError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::BadRequest => Self::InvalidInput(err.to_string()),
            ErrorKind::Unavailable | ErrorKind::Internal => Self::ExecutionFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuona_tools::ToolError;

    #[test]
    fn test_error_display() {
        let err = EngineError::TranscriptNotFound {
            ticker: "AAPL".to_string(),
            call_date: NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
        };
        assert_eq!(err.to_string(), "No transcript found for AAPL on 2025-01-28");

        let err = EngineError::NoUsableEvents { horizon: 3 };
        assert_eq!(err.to_string(), "No events had valid 3d returns for backtest");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(EngineError::NoEvents.kind(), ErrorKind::NotFound);
        assert_eq!(EngineError::NoUsableEvents { horizon: 1 }.kind(), ErrorKind::BadRequest);
        assert_eq!(EngineError::InvalidDate("x".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(EngineError::PriceProvider("down".into()).kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_error_conversion() {
        let tool_err: ToolError = EngineError::NoEvents.into();
        assert!(tool_err.is_not_found());

        let tool_err: ToolError = EngineError::NoUsableEvents { horizon: 3 }.into();
        assert!(tool_err.is_invalid_input());

        let tool_err: ToolError = EngineError::ConfigError("bad".into()).into();
        assert!(matches!(tool_err, ToolError::ExecutionFailed(msg) if msg.contains("bad")));
    }
}

use thiserror::Error;

/// Validation failures caught before any network call leaves the session.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount is required")]
    MissingAmount,

    #[error("reference price unavailable")]
    PriceUnavailable,

    #[error("tick {0} outside supported range")]
    TickOutOfRange(i32),

    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),

    #[error("no quote available")]
    MissingQuote,
}

/// Failures raised by the backend gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend rejected the call ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Maps a gateway failure onto the message shown in a UI toast.
    /// Wire details stay in the logs, not in front of the user.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Transport(_) => {
                "Could not reach the exchange. Check your connection and retry.".to_string()
            }
            GatewayError::Timeout => {
                "The exchange took too long to respond. Please retry.".to_string()
            }
            GatewayError::Rejected { message, .. } => message.clone(),
            GatewayError::InvalidResponse(_) => {
                "The exchange returned an unexpected response. Please retry.".to_string()
            }
        }
    }
}

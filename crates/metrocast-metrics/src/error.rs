//! Tracking-adapter error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized - API key may be invalid")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl MetricsError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Unauthorized => "Tracking API key is invalid. Check settings.".to_string(),
            Self::Api { status, .. } => format!("Tracking service error ({})", status),
            Self::Parse(_) => "Training metrics could not be decoded.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_carry_context() {
        assert!(MetricsError::Unauthorized.user_message().contains("key"));
        let err = MetricsError::Api {
            status: 502,
            message: "bad gateway".into(),
        };
        assert!(err.user_message().contains("502"));
    }
}

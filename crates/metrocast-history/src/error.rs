//! Observation-adapter error types.

use thiserror::Error;

use crate::csv::CsvError;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("No observations available")]
    Empty,

    #[error("Cache error: {0}")]
    Cache(String),
}

impl HistoryError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Api { status, .. } => format!("Data source error ({})", status),
            Self::Csv(e) => format!("Malformed observation export: {}", e),
            Self::Empty => "No observation data is available yet.".to_string(),
            Self::Cache(_) => "Observation data may be outdated.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_carry_context() {
        let err = HistoryError::Api {
            status: 404,
            message: "missing".into(),
        };
        assert!(err.user_message().contains("404"));

        let err = HistoryError::Csv(CsvError::MissingColumn("precipitation".into()));
        assert!(err.user_message().contains("precipitation"));
    }
}

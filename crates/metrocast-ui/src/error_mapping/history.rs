use crate::services::history_service::HistoryError as UiHistoryError;
use metrocast_core::{AppError, HistoryError};

impl From<UiHistoryError> for AppError {
    fn from(e: UiHistoryError) -> Self {
        match e {
            UiHistoryError::Network(s) => AppError::History(HistoryError::Fetch(s)),
            UiHistoryError::Data(s) => AppError::History(HistoryError::Malformed(s)),
            UiHistoryError::NotInitialized => {
                AppError::History(HistoryError::Fetch("service not initialized".to_string()))
            }
        }
    }
}

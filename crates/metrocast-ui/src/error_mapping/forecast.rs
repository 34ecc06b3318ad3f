use crate::services::prediction_service::PredictionError as UiPredictionError;
use metrocast_core::{AppError, NetworkError, PredictionError};

impl From<UiPredictionError> for AppError {
    fn from(e: UiPredictionError) -> Self {
        match e {
            UiPredictionError::Rejected { expected, got } => {
                AppError::Prediction(PredictionError::WindowMismatch { expected, got })
            }
            UiPredictionError::Api(s) => AppError::Prediction(PredictionError::ApiError(s)),
            UiPredictionError::Network(s) => {
                AppError::Network(NetworkError::ConnectionFailed(s))
            }
            UiPredictionError::NotInitialized => {
                AppError::Prediction(PredictionError::ServiceUnavailable)
            }
        }
    }
}

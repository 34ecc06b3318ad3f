use crate::services::metrics_service::MetricsError as UiMetricsError;
use metrocast_core::{AppError, MetricsError};

impl From<UiMetricsError> for AppError {
    fn from(e: UiMetricsError) -> Self {
        match e {
            UiMetricsError::Network(s) => AppError::Metrics(MetricsError::ApiError(s)),
            UiMetricsError::Unauthorized => AppError::Metrics(MetricsError::Unauthorized),
            UiMetricsError::NotConfigured => AppError::Metrics(MetricsError::NotConfigured),
        }
    }
}

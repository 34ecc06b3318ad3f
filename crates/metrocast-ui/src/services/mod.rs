//! Background service request functions.
//!
//! All network work runs on the service runtime; results come back to the
//! UI thread as mpsc messages the store applies.

pub mod history_service;
pub mod metrics_service;
pub mod prediction_service;

pub use history_service::{
    request_fetch as request_history_fetch, HistoryError, HistoryFetch, HistoryServiceMessage,
};
pub use metrics_service::{
    request_history as request_metrics_history, request_summary as request_metrics_summary,
    MetricsError, MetricsServiceMessage,
};
pub use prediction_service::{
    request_fetch as request_prediction_fetch, PredictionError, PredictionServiceMessage,
    PredictionTarget,
};

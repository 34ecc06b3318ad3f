//! Experiment-tracking backend: async run metric fetches for the console.

use std::sync::Arc;

use metrocast_metrics::{HistoryPoint, MetricsClient, RunMetrics};

/// Error type for metrics operations
#[derive(Debug, Clone)]
pub enum MetricsError {
    Network(String),
    Unauthorized,
    NotConfigured,
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Network(s) => write!(f, "Metrics error: {}", s),
            MetricsError::Unauthorized => write!(f, "Tracking API key is invalid"),
            MetricsError::NotConfigured => write!(f, "Experiment tracking not configured"),
        }
    }
}

impl std::error::Error for MetricsError {}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum MetricsServiceMessage {
    /// Latest finished run summary (None when the project has no runs)
    SummaryDone(Result<Option<RunMetrics>, MetricsError>),
    /// Sampled training history, sorted by epoch
    HistoryDone(Result<Vec<HistoryPoint>, MetricsError>),
}

/// Request the latest run summary asynchronously.
pub fn request_summary(
    tx: &std::sync::mpsc::Sender<MetricsServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<MetricsClient>,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = client.latest_run().await.map_err(map_error);
        let _ = tx.send(MetricsServiceMessage::SummaryDone(result));
    });
}

/// Request the sampled training history asynchronously.
pub fn request_history(
    tx: &std::sync::mpsc::Sender<MetricsServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<MetricsClient>,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = client.run_history().await.map_err(map_error);
        let _ = tx.send(MetricsServiceMessage::HistoryDone(result));
    });
}

fn map_error(e: metrocast_metrics::MetricsError) -> MetricsError {
    use metrocast_metrics::MetricsError as Inner;
    match e {
        Inner::Unauthorized => MetricsError::Unauthorized,
        other => MetricsError::Network(other.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_error_display() {
        assert!(format!("{}", MetricsError::Unauthorized).contains("invalid"));
        assert!(format!("{}", MetricsError::NotConfigured).contains("not configured"));
    }

    #[test]
    fn unauthorized_maps_through() {
        assert!(matches!(
            map_error(metrocast_metrics::MetricsError::Unauthorized),
            MetricsError::Unauthorized
        ));
    }
}

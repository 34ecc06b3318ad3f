//! Prediction backend: async inference requests.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use metrocast_core::error::ReqwestErrorExt;
use metrocast_forecast::{PredictionClient, WeatherInputRecord};

/// Error type for prediction operations
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Window violation caught client-side; never reached the network
    Rejected { expected: usize, got: usize },
    Api(String),
    Network(String),
    NotInitialized,
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::Rejected { expected, got } => {
                write!(f, "Exactly {} hours of history are required (got {})", expected, got)
            }
            PredictionError::Api(s) => write!(f, "Prediction error: {}", s),
            PredictionError::Network(s) => write!(f, "Network error: {}", s),
            PredictionError::NotInitialized => write!(f, "Prediction service not initialized"),
        }
    }
}

impl std::error::Error for PredictionError {}

/// Which result slot a request fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionTarget {
    Dashboard,
    Console,
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum PredictionServiceMessage {
    /// Result of one inference request
    FetchDone(PredictionTarget, Result<Vec<f32>, PredictionError>),
}

/// Request an inference run asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<PredictionServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<PredictionClient>,
    target: PredictionTarget,
    history: Vec<WeatherInputRecord>,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = client.predict(&history).await.map_err(map_error);
        if let Err(e) = &result {
            tracing::warn!("Prediction request failed: {}", e);
        }
        let _ = tx.send(PredictionServiceMessage::FetchDone(target, result));
    });
}

fn map_error(e: metrocast_forecast::PredictionError) -> PredictionError {
    use metrocast_forecast::PredictionError as Inner;
    match e {
        Inner::WindowMismatch { expected, got } => PredictionError::Rejected { expected, got },
        Inner::Api { status, message } => {
            PredictionError::Api(format!("{}: {}", status, message))
        }
        Inner::Network(e) => PredictionError::Network(e.into_network_error().to_string()),
        Inner::Parse(s) => PredictionError::Api(s),
    }
}

//! HTTP client for the temperature-prediction service.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::types::{
    PredictionError, PredictionRequest, PredictionResponse, PredictionWindow, WeatherInputRecord,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    window: PredictionWindow,
}

impl PredictionClient {
    pub fn new(base_url: &str, window: PredictionWindow) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            window,
        })
    }

    /// Input window variant this client was configured for
    pub fn window(&self) -> PredictionWindow {
        self.window
    }

    /// Check that a history slice fills the configured window exactly.
    ///
    /// Violations never reach the network; the caller surfaces the error
    /// directly in UI state.
    pub fn validate_window(&self, history: &[WeatherInputRecord]) -> Result<(), PredictionError> {
        let expected = self.window.hours();
        if history.len() != expected {
            return Err(PredictionError::WindowMismatch {
                expected,
                got: history.len(),
            });
        }
        Ok(())
    }

    /// Submit one window of hourly records and return the predicted
    /// temperature curve.
    #[instrument(skip(self, history), level = "info")]
    pub async fn predict(
        &self,
        history: &[WeatherInputRecord],
    ) -> Result<Vec<f32>, PredictionError> {
        self.validate_window(history)?;

        let url = format!("{}/predict", self.base_url);
        let request = PredictionRequest {
            recent_history: history.to_vec(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let resp: PredictionResponse = self.handle_response(response).await?;

        tracing::info!("Received {} predicted hours", resp.predictions.len());
        Ok(resp.predictions)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PredictionError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| PredictionError::Parse(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(PredictionError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

//! HTTP client for the observation export.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use metrocast_forecast::WeatherInputRecord;

use crate::csv::parse_observations;
use crate::error::HistoryError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ObservationsClient {
    client: Client,
    base_url: String,
    object_key: String,
}

impl ObservationsClient {
    pub fn new(base_url: &str, object_key: &str) -> Result<Self, HistoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            object_key: object_key.trim_start_matches('/').to_string(),
        })
    }

    /// Fetch the full rolling export, oldest record first.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_latest(&self) -> Result<Vec<WeatherInputRecord>, HistoryError> {
        let url = format!("{}/{}", self.base_url, self.object_key);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(HistoryError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        let records = parse_observations(&body)?;

        tracing::info!("Fetched {} hourly observations", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EXPORT: &str = "time,temperature_2m,relative_humidity_2m,dew_point_2m,surface_pressure,precipitation,cloud_cover,shortwave_radiation,wind_speed_10m,wind_direction_10m,soil_temperature_0_to_7cm,weather_code\n\
2024-03-01T00:00,10.1,81,6.9,1016.4,0.0,75,0,11.2,220,8.4,3\n\
2024-03-01T01:00,9.8,83,6.8,1016.1,0.2,100,0,10.4,215,8.3,61";

    #[tokio::test]
    async fn fetches_and_parses_export() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/istanbul_weather.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EXPORT))
            .mount(&mock_server)
            .await;

        let client = ObservationsClient::new(&mock_server.uri(), "istanbul_weather.csv").unwrap();
        let records = client.fetch_latest().await.unwrap();

        assert_eq!(records.len(), 2);
        assert!((records[1].temperature_2m - 9.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn missing_object_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/istanbul_weather.csv"))
            .respond_with(ResponseTemplate::new(404).set_body_string("NoSuchKey"))
            .mount(&mock_server)
            .await;

        let client = ObservationsClient::new(&mock_server.uri(), "istanbul_weather.csv").unwrap();
        let result = client.fetch_latest().await;

        assert!(matches!(
            result,
            Err(HistoryError::Api { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_export_is_a_csv_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/istanbul_weather.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not,a,real\nexport"))
            .mount(&mock_server)
            .await;

        let client = ObservationsClient::new(&mock_server.uri(), "istanbul_weather.csv").unwrap();
        let result = client.fetch_latest().await;

        assert!(matches!(result, Err(HistoryError::Csv(_))));
    }
}

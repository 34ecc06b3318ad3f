use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input window variant the deployed model was exported with.
///
/// The serving endpoint accepts exactly this many hourly records per
/// request; anything else is rejected client-side before a request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionWindow {
    /// 24 hourly records, 24 predicted hours
    #[default]
    Day,
    /// 168 hourly records (7 days), 168 predicted hours
    Week,
}

impl PredictionWindow {
    /// Number of hourly records the window holds
    pub fn hours(&self) -> usize {
        match self {
            PredictionWindow::Day => 24,
            PredictionWindow::Week => 168,
        }
    }
}

/// One hourly observation, in the wire order the prediction service expects.
///
/// Records are chronological; `weather_code` is the raw WMO code carried as
/// a float because the service feeds it to an embedding layer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInputRecord {
    pub timestamp: DateTime<Utc>,
    pub temperature_2m: f32,
    pub relative_humidity_2m: f32,
    pub dew_point_2m: f32,
    pub surface_pressure: f32,
    pub precipitation: f32,
    pub cloud_cover: f32,
    pub shortwave_radiation: f32,
    pub wind_speed_10m: f32,
    pub wind_direction_10m: f32,
    pub soil_temperature_0_to_7cm: f32,
    pub weather_code: f32,
}

/// Request body for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub recent_history: Vec<WeatherInputRecord>,
}

/// Response body of `POST /predict`: one predicted temperature (Celsius)
/// per forecast hour, aligned to hours after the last input timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<f32>,
}

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Clear,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Map a raw WMO weather code to a condition category.
    /// Unknown codes fall back to `Clear`.
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    /// English description used as a neutral fallback label
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    /// Icon name for the rendering layer
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle => "cloud_drizzle",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}

/// Prediction adapter errors
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Expected {expected} hourly records, got {got}")]
    WindowMismatch { expected: usize, got: usize },
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(hour: u32) -> WeatherInputRecord {
        WeatherInputRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            temperature_2m: 11.5,
            relative_humidity_2m: 72.0,
            dew_point_2m: 6.6,
            surface_pressure: 1018.2,
            precipitation: 0.0,
            cloud_cover: 40.0,
            shortwave_radiation: 120.0,
            wind_speed_10m: 14.0,
            wind_direction_10m: 230.0,
            soil_temperature_0_to_7cm: 9.1,
            weather_code: 2.0,
        }
    }

    #[test]
    fn window_hours() {
        assert_eq!(PredictionWindow::Day.hours(), 24);
        assert_eq!(PredictionWindow::Week.hours(), 168);
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let json = serde_json::to_value(record(6)).unwrap();
        for key in [
            "timestamp",
            "temperature_2m",
            "relative_humidity_2m",
            "dew_point_2m",
            "surface_pressure",
            "precipitation",
            "cloud_cover",
            "shortwave_radiation",
            "wind_speed_10m",
            "wind_direction_10m",
            "soil_temperature_0_to_7cm",
            "weather_code",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {}", key);
        }
    }

    #[test]
    fn request_round_trip() {
        let request = PredictionRequest {
            recent_history: vec![record(0), record(1)],
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: PredictionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.recent_history, request.recent_history);
    }

    #[test]
    fn wmo_code_groups() {
        assert_eq!(Condition::from_wmo_code(0), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(2), Condition::Cloudy);
        assert_eq!(Condition::from_wmo_code(45), Condition::Fog);
        assert_eq!(Condition::from_wmo_code(55), Condition::Drizzle);
        assert_eq!(Condition::from_wmo_code(63), Condition::Rain);
        assert_eq!(Condition::from_wmo_code(81), Condition::Rain);
        assert_eq!(Condition::from_wmo_code(75), Condition::Snow);
        assert_eq!(Condition::from_wmo_code(96), Condition::Thunderstorm);
    }

    #[test]
    fn wmo_code_unknown_defaults_to_clear() {
        assert_eq!(Condition::from_wmo_code(999), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(-1), Condition::Clear);
    }
}

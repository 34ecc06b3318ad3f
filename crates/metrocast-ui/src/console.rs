//! Request-builder console: hand editing of one input window before
//! triggering inference.
//!
//! The console operates on plain record vectors held in the store; the
//! functions here cover field editing, payload preview and the output
//! summary shown next to the chart.

use chrono::{DateTime, Datelike, Timelike, Utc};

use metrocast_forecast::{PredictionRequest, WeatherInputRecord};

use crate::translations::{weekday_label, Language};

/// Editable numeric columns of the console table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleField {
    Temperature,
    Humidity,
    DewPoint,
    Pressure,
    Precipitation,
    CloudCover,
    Radiation,
    WindSpeed,
    WindDirection,
    SoilTemperature,
    WeatherCode,
}

impl ConsoleField {
    pub const ALL: [ConsoleField; 11] = [
        ConsoleField::Temperature,
        ConsoleField::Humidity,
        ConsoleField::DewPoint,
        ConsoleField::Pressure,
        ConsoleField::Precipitation,
        ConsoleField::CloudCover,
        ConsoleField::Radiation,
        ConsoleField::WindSpeed,
        ConsoleField::WindDirection,
        ConsoleField::SoilTemperature,
        ConsoleField::WeatherCode,
    ];

    /// Column header shown above the table
    pub fn label(&self) -> &'static str {
        match self {
            ConsoleField::Temperature => "Temp (°C)",
            ConsoleField::Humidity => "Hum (%)",
            ConsoleField::DewPoint => "Dew (°C)",
            ConsoleField::Pressure => "Press (hPa)",
            ConsoleField::Precipitation => "Precip (mm)",
            ConsoleField::CloudCover => "Cloud (%)",
            ConsoleField::Radiation => "Rad (W/m²)",
            ConsoleField::WindSpeed => "Wind (m/s)",
            ConsoleField::WindDirection => "Dir (°)",
            ConsoleField::SoilTemperature => "Soil (°C)",
            ConsoleField::WeatherCode => "Code",
        }
    }
}

/// Apply one hand-typed cell edit.
///
/// Unparseable input is coerced to 0, mirroring what a numeric input field
/// yields while the user is mid-edit.
pub fn apply_field(record: &mut WeatherInputRecord, field: ConsoleField, value: &str) {
    let value: f32 = value.trim().parse().unwrap_or(0.0);
    match field {
        ConsoleField::Temperature => record.temperature_2m = value,
        ConsoleField::Humidity => record.relative_humidity_2m = value,
        ConsoleField::DewPoint => record.dew_point_2m = value,
        ConsoleField::Pressure => record.surface_pressure = value,
        ConsoleField::Precipitation => record.precipitation = value,
        ConsoleField::CloudCover => record.cloud_cover = value,
        ConsoleField::Radiation => record.shortwave_radiation = value,
        ConsoleField::WindSpeed => record.wind_speed_10m = value,
        ConsoleField::WindDirection => record.wind_direction_10m = value,
        ConsoleField::SoilTemperature => record.soil_temperature_0_to_7cm = value,
        ConsoleField::WeatherCode => record.weather_code = value,
    }
}

/// Relative-hour pill for a table row: "T-0h" is the newest record.
pub fn offset_label(index: usize, window_len: usize) -> String {
    let offset = window_len.saturating_sub(index + 1);
    format!("T-{}h", offset)
}

/// Clock pill for a table row.
pub fn clock_label(record: &WeatherInputRecord) -> String {
    format!(
        "{:02}:{:02}",
        record.timestamp.hour(),
        record.timestamp.minute()
    )
}

/// Pretty-printed request body, as it would go over the wire.
pub fn payload_preview(history: &[WeatherInputRecord]) -> String {
    let request = PredictionRequest {
        recent_history: history.to_vec(),
    };
    serde_json::to_string_pretty(&request).unwrap_or_else(|_| "{}".to_string())
}

/// Peak/low of a returned forecast curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSummary {
    pub peak: f32,
    pub low: f32,
}

pub fn output_summary(predictions: &[f32]) -> Option<OutputSummary> {
    let first = *predictions.first()?;
    let summary = predictions.iter().fold(
        OutputSummary {
            peak: first,
            low: first,
        },
        |mut acc, &t| {
            if t > acc.peak {
                acc.peak = t;
            }
            if t < acc.low {
                acc.low = t;
            }
            acc
        },
    );
    Some(summary)
}

/// One point of the console output chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolePoint {
    /// Tooltip label, e.g. "Sal 14:00"
    pub label: String,
    /// Axis label (weekday only)
    pub day_label: &'static str,
    pub temperature: f32,
}

/// Chart series for the console output, labelled by localized weekday + hour.
pub fn chart_series(
    language: Language,
    last_input: DateTime<Utc>,
    predictions: &[f32],
) -> Vec<ConsolePoint> {
    predictions
        .iter()
        .enumerate()
        .map(|(i, &temperature)| {
            let time = last_input + chrono::Duration::hours(i as i64 + 1);
            let day_label = weekday_label(language, time.weekday());
            ConsolePoint {
                label: format!("{} {:02}:00", day_label, time.hour()),
                day_label,
                temperature,
            }
        })
        .collect()
}

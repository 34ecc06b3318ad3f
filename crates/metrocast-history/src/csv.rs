//! Parsing of the rolling hourly observation CSV.
//!
//! The export carries one header row followed by one row per hour, oldest
//! first. The time column is named either `time` (pipeline export) or
//! `timestamp`; all other columns match the prediction wire names. An empty
//! numeric cell means the sensor value was missing and is read as 0.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use metrocast_forecast::WeatherInputRecord;

const NUMERIC_COLUMNS: [&str; 11] = [
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
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("export is empty")]
    Empty,

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("line {line}: bad number in column {column}")]
    BadNumber { line: usize, column: String },

    #[error("line {line}: bad timestamp")]
    BadTimestamp { line: usize },

    #[error("line {line}: expected {expected} fields, got {got}")]
    ShortRow {
        line: usize,
        expected: usize,
        got: usize,
    },
}

/// Parse a full observation export into chronological records.
pub fn parse_observations(text: &str) -> Result<Vec<WeatherInputRecord>, CsvError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or(CsvError::Empty)?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let time_idx = columns
        .iter()
        .position(|&c| c == "time" || c == "timestamp")
        .ok_or_else(|| CsvError::MissingColumn("timestamp".to_string()))?;

    let mut numeric_idx = [0usize; NUMERIC_COLUMNS.len()];
    for (slot, name) in numeric_idx.iter_mut().zip(NUMERIC_COLUMNS) {
        *slot = columns
            .iter()
            .position(|&c| c == name)
            .ok_or_else(|| CsvError::MissingColumn(name.to_string()))?;
    }

    let expected_fields = columns.len();
    let mut records = Vec::new();

    for (row, line) in lines.enumerate() {
        // Header is line 1; data starts at line 2
        let line_no = row + 2;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        if fields.len() < expected_fields {
            return Err(CsvError::ShortRow {
                line: line_no,
                expected: expected_fields,
                got: fields.len(),
            });
        }

        let timestamp = parse_timestamp(fields[time_idx])
            .ok_or(CsvError::BadTimestamp { line: line_no })?;

        let mut values = [0.0f32; NUMERIC_COLUMNS.len()];
        for ((value, &idx), name) in values
            .iter_mut()
            .zip(numeric_idx.iter())
            .zip(NUMERIC_COLUMNS)
        {
            let cell = fields[idx];
            if cell.is_empty() {
                continue;
            }
            *value = cell.parse().map_err(|_| CsvError::BadNumber {
                line: line_no,
                column: name.to_string(),
            })?;
        }

        records.push(WeatherInputRecord {
            timestamp,
            temperature_2m: values[0],
            relative_humidity_2m: values[1],
            dew_point_2m: values[2],
            surface_pressure: values[3],
            precipitation: values[4],
            cloud_cover: values[5],
            shortwave_radiation: values[6],
            wind_speed_10m: values[7],
            wind_direction_10m: values[8],
            soil_temperature_0_to_7cm: values[9],
            weather_code: values[10],
        });
    }

    if records.is_empty() {
        return Err(CsvError::Empty);
    }

    Ok(records)
}

/// Most recent `hours` records, or None when the export is too short.
pub fn tail_window(records: &[WeatherInputRecord], hours: usize) -> Option<&[WeatherInputRecord]> {
    if records.len() < hours {
        return None;
    }
    Some(&records[records.len() - hours..])
}

fn parse_timestamp(cell: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.with_timezone(&Utc));
    }
    // Pipeline exports omit offset (and sometimes seconds)
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

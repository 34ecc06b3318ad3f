//! Baseline window used by the console as an editable starting point.

use chrono::{DateTime, Duration, Utc};

use metrocast_forecast::WeatherInputRecord;

/// Build a neutral window of `hours` hourly records ending at `end`.
///
/// Values are a calm mid-latitude default: 20 °C at standard sea-level
/// pressure, everything else zero. Timestamps run oldest-first so the
/// window is valid request input as-is.
pub fn baseline_window(hours: usize, end: DateTime<Utc>) -> Vec<WeatherInputRecord> {
    (0..hours)
        .map(|i| WeatherInputRecord {
            timestamp: end - Duration::hours((hours - 1 - i) as i64),
            temperature_2m: 20.0,
            relative_humidity_2m: 0.0,
            dew_point_2m: 0.0,
            surface_pressure: 1013.0,
            precipitation: 0.0,
            cloud_cover: 0.0,
            shortwave_radiation: 0.0,
            wind_speed_10m: 0.0,
            wind_direction_10m: 0.0,
            soil_temperature_0_to_7cm: 0.0,
            weather_code: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_is_hourly_and_ends_at_end() {
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        let window = baseline_window(168, end);

        assert_eq!(window.len(), 168);
        assert_eq!(window[167].timestamp, end);
        assert_eq!(window[0].timestamp, end - Duration::hours(167));
        for pair in window.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn baseline_values_are_neutral() {
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        let window = baseline_window(24, end);

        assert!((window[0].temperature_2m - 20.0).abs() < 1e-6);
        assert!((window[0].surface_pressure - 1013.0).abs() < 1e-6);
        assert_eq!(window[0].precipitation, 0.0);
        assert_eq!(window[0].weather_code, 0.0);
    }
}

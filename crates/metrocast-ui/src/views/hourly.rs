//! Hourly forecast strip.

use chrono::Timelike;

use metrocast_forecast::{forecast_hours, Condition};

use crate::store::DashboardState;

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyEntry {
    /// Clock label, e.g. "14:00"
    pub label: String,
    pub temperature: i32,
    pub icon: &'static str,
}

/// One entry per predicted hour; empty until a prediction has run.
///
/// The model predicts temperature only, so the strip carries the latest
/// observed condition forward for its icons.
pub fn hourly_strip(state: &DashboardState) -> Vec<HourlyEntry> {
    let (Some(predictions), Some(last)) = (state.predictions.as_ref(), state.input_history.last())
    else {
        return Vec::new();
    };

    let icon = Condition::from_wmo_code(last.weather_code as i32).icon_name();

    forecast_hours(last.timestamp, predictions)
        .iter()
        .map(|hour| HourlyEntry {
            label: format!("{:02}:00", hour.time.hour()),
            temperature: hour.temperature.round() as i32,
            icon,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use metrocast_history::baseline_window;

    #[test]
    fn strip_is_empty_without_predictions() {
        let state = DashboardState::default();
        assert!(hourly_strip(&state).is_empty());
    }

    #[test]
    fn entries_follow_the_clock_after_last_observation() {
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 22, 0, 0).unwrap();
        let mut history = baseline_window(24, end);
        history[23].weather_code = 71.0;

        let state = DashboardState {
            input_history: history,
            predictions: Some(vec![4.4, 3.6, 3.2]),
            ..DashboardState::default()
        };

        let strip = hourly_strip(&state);
        assert_eq!(strip.len(), 3);
        assert_eq!(strip[0].label, "23:00");
        assert_eq!(strip[1].label, "00:00");
        assert_eq!(strip[0].temperature, 4);
        assert_eq!(strip[0].icon, "cloud_snow");
    }
}

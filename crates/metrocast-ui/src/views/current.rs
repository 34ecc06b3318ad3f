//! Current-conditions card.

use chrono::{DateTime, Datelike, Utc};

use metrocast_forecast::Condition;

use crate::store::DashboardState;
use crate::translations::weekday_label;

/// The deployment covers a single metro area.
pub const LOCATION_LABEL: &str = "Istanbul, TR";

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Resolved temperature, if any data is loaded
    pub temperature: Option<f32>,
    /// Latest observed condition
    pub condition: Condition,
    pub location: &'static str,
    /// Localized weekday label for "now"
    pub day_label: &'static str,
}

impl CurrentConditions {
    /// Rounded display string, "--" before any data arrives.
    pub fn display_temperature(&self) -> String {
        match self.temperature {
            Some(t) => format!("{}", t.round() as i32),
            None => "--".to_string(),
        }
    }
}

/// Resolve the card from store state.
///
/// Temperature resolution order: explicit override (day selection), then
/// the first predicted hour, then the newest observed record.
pub fn current_conditions(state: &DashboardState, now: DateTime<Utc>) -> CurrentConditions {
    let latest = state.input_history.last();

    let temperature = state
        .displayed_temp
        .or_else(|| state.predictions.as_ref().and_then(|p| p.first().copied()))
        .or_else(|| latest.map(|r| r.temperature_2m));

    let condition = latest
        .map(|r| Condition::from_wmo_code(r.weather_code as i32))
        .unwrap_or_default();

    CurrentConditions {
        temperature,
        condition,
        location: LOCATION_LABEL,
        day_label: weekday_label(state.language, now.weekday()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use metrocast_history::baseline_window;

    use crate::translations::Language;

    fn loaded_state() -> DashboardState {
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        let mut history = baseline_window(24, end);
        history[23].temperature_2m = 8.6;
        history[23].weather_code = 63.0;

        DashboardState {
            input_history: history,
            ..DashboardState::default()
        }
    }

    #[test]
    fn falls_back_to_latest_observation() {
        let state = loaded_state();
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();

        let card = current_conditions(&state, now);
        assert!((card.temperature.unwrap() - 8.6).abs() < 1e-6);
        assert_eq!(card.condition, Condition::Rain);
        assert_eq!(card.display_temperature(), "9");
    }

    #[test]
    fn first_prediction_beats_observation() {
        let mut state = loaded_state();
        state.predictions = Some(vec![15.2, 16.0]);
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();

        let card = current_conditions(&state, now);
        assert!((card.temperature.unwrap() - 15.2).abs() < 1e-6);
    }

    #[test]
    fn override_beats_everything() {
        let mut state = loaded_state();
        state.predictions = Some(vec![15.2]);
        state.displayed_temp = Some(21.0);
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();

        let card = current_conditions(&state, now);
        assert!((card.temperature.unwrap() - 21.0).abs() < 1e-6);
    }

    #[test]
    fn empty_state_shows_placeholder() {
        let state = DashboardState::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();

        let card = current_conditions(&state, now);
        assert!(card.temperature.is_none());
        assert_eq!(card.display_temperature(), "--");
        assert_eq!(card.condition, Condition::Clear);
    }

    #[test]
    fn day_label_is_localized() {
        let mut state = DashboardState::default();
        // 2024-03-08 is a Friday
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();

        assert_eq!(current_conditions(&state, now).day_label, "Cum");
        state.language = Language::En;
        assert_eq!(current_conditions(&state, now).day_label, "Fri");
    }
}

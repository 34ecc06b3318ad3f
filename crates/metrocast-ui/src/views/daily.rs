//! Multi-day forecast strip.

use chrono::{Datelike, NaiveDate};

use metrocast_forecast::{daily_summary, forecast_hours, Condition};

use crate::store::DashboardState;
use crate::translations::weekday_label;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub day_label: &'static str,
    pub high: i32,
    pub low: i32,
    pub icon: &'static str,
    pub selected: bool,
}

/// One entry per forecast calendar day; empty until a prediction has run.
pub fn daily_strip(state: &DashboardState) -> Vec<DailyEntry> {
    let (Some(predictions), Some(last)) = (state.predictions.as_ref(), state.input_history.last())
    else {
        return Vec::new();
    };

    let icon = Condition::from_wmo_code(last.weather_code as i32).icon_name();

    daily_summary(&forecast_hours(last.timestamp, predictions))
        .iter()
        .enumerate()
        .map(|(i, day)| DailyEntry {
            date: day.date,
            day_label: weekday_label(state.language, day.date.weekday()),
            high: day.high.round() as i32,
            low: day.low.round() as i32,
            icon,
            selected: i == state.selected_day,
        })
        .collect()
}

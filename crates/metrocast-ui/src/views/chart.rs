//! Time-series chart data.

use chrono::Timelike;

use metrocast_forecast::WeatherInputRecord;

use crate::store::{DashboardState, MetricTab};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Axis label, e.g. "14:00"
    pub label: String,
    pub value: f32,
    /// Measured value plotted against the prediction (temperature tab only)
    pub comparison: Option<f32>,
}

/// Series for the active metric tab.
///
/// The temperature tab plots the prediction curve (with the measured
/// overlay when loaded); precipitation and wind plot the corresponding
/// input-history field.
pub fn chart_series(state: &DashboardState) -> Vec<ChartPoint> {
    match state.active_tab {
        MetricTab::Temperature => prediction_series(state),
        MetricTab::Precipitation => history_series(state, |r| r.precipitation),
        MetricTab::Wind => history_series(state, |r| r.wind_speed_10m),
    }
}

fn prediction_series(state: &DashboardState) -> Vec<ChartPoint> {
    let Some(predictions) = state.predictions.as_ref() else {
        return Vec::new();
    };

    predictions
        .iter()
        .enumerate()
        .map(|(i, &value)| ChartPoint {
            label: format!("{}:00", i),
            value,
            comparison: state.real_data.as_ref().and_then(|r| r.get(i).copied()),
        })
        .collect()
}

fn history_series(
    state: &DashboardState,
    field: impl Fn(&WeatherInputRecord) -> f32,
) -> Vec<ChartPoint> {
    state
        .input_history
        .iter()
        .map(|record| ChartPoint {
            label: format!("{}:00", record.timestamp.hour()),
            value: field(record),
            comparison: None,
        })
        .collect()
}

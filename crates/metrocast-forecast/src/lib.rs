//! Prediction-service adapter for the MetroCast client.
//!
//! Provides the wire types of the temperature model's `POST /predict`
//! endpoint, client-side window validation, and the derived hourly/daily
//! outlook computed from a prediction run.

pub mod client;
pub mod derive;
pub mod types;

pub use client::PredictionClient;
pub use derive::{daily_summary, forecast_hours, ForecastDay, ForecastHour};
pub use types::*;

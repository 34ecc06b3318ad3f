//! Experiment-tracking adapter for the MetroCast client.
//!
//! Reads training-run metrics of the deployed temperature model from the
//! Weights & Biases GraphQL API: the latest finished run's summary and a
//! sampled loss/MAE history for the console charts.

pub mod client;
pub mod error;
pub mod types;

pub use client::MetricsClient;
pub use error::MetricsError;
pub use types::{HistoryPoint, RunMetrics};

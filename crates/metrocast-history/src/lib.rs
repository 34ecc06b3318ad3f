//! Historical-observation adapter for the MetroCast client.
//!
//! Fetches the rolling hourly CSV export (S3 or proxy), parses it into
//! typed records, caches the last fetched window on disk, and provides the
//! baseline window the console uses as a starting point.

pub mod cache;
pub mod client;
pub mod csv;
pub mod error;
pub mod sample;

pub use cache::{CachedObservations, ObservationCache};
pub use client::ObservationsClient;
pub use csv::{parse_observations, tail_window, CsvError};
pub use error::HistoryError;
pub use sample::baseline_window;

//! Observation backend: async sample-data loading with cache fallback.

use std::sync::Arc;

use chrono::Utc;

use metrocast_history::{tail_window, ObservationCache, ObservationsClient};
use metrocast_forecast::WeatherInputRecord;

/// Error type for observation operations
#[derive(Debug, Clone)]
pub enum HistoryError {
    Network(String),
    Data(String),
    NotInitialized,
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::Network(s) => write!(f, "Network error: {}", s),
            HistoryError::Data(s) => write!(f, "Data error: {}", s),
            HistoryError::NotInitialized => write!(f, "Observation service not initialized"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// A fetched observation window
#[derive(Debug, Clone)]
pub struct HistoryFetch {
    pub records: Vec<WeatherInputRecord>,
    /// True when the export was unreachable and a fresh cache was used
    pub from_cache: bool,
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum HistoryServiceMessage {
    /// Result of loading one observation window
    FetchDone(Result<HistoryFetch, HistoryError>),
}

/// Request the latest observation window asynchronously.
///
/// On success the cache is refreshed; when the export is unreachable a
/// still-fresh cache window is served instead. Sends `FetchDone` when done.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<HistoryServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<ObservationsClient>,
    cache: Option<Arc<ObservationCache>>,
    window_hours: usize,
    cache_minutes: u32,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = match client.fetch_latest().await {
            Ok(records) => match tail_window(&records, window_hours) {
                Some(window) => {
                    let window = window.to_vec();
                    if let Some(cache) = &cache {
                        if let Err(e) = cache.store(&window) {
                            tracing::warn!("Failed to cache observations: {}", e);
                        }
                    }
                    Ok(HistoryFetch {
                        records: window,
                        from_cache: false,
                    })
                }
                None => Err(HistoryError::Data(format!(
                    "export holds {} records, need {}",
                    records.len(),
                    window_hours
                ))),
            },
            Err(e) => {
                tracing::warn!("Observation fetch failed: {}", e);
                match cached_window(cache.as_deref(), window_hours, cache_minutes) {
                    Some(records) => Ok(HistoryFetch {
                        records,
                        from_cache: true,
                    }),
                    None => Err(HistoryError::Network(e.user_message())),
                }
            }
        };

        let _ = tx.send(HistoryServiceMessage::FetchDone(result));
    });
}

fn cached_window(
    cache: Option<&ObservationCache>,
    window_hours: usize,
    cache_minutes: u32,
) -> Option<Vec<WeatherInputRecord>> {
    let entry = cache?.load().ok()??;
    if !entry.is_fresh(cache_minutes, Utc::now()) {
        return None;
    }
    tail_window(&entry.records, window_hours).map(<[WeatherInputRecord]>::to_vec)
}

//! JSON-file cache for the last fetched observation window.
//!
//! Keeps the dashboard usable across restarts while the export is
//! unreachable; staleness is decided by the configured TTL.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use metrocast_forecast::WeatherInputRecord;

use crate::error::HistoryError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedObservations {
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<WeatherInputRecord>,
}

impl CachedObservations {
    /// Whether the cached window is still usable under the given TTL.
    pub fn is_fresh(&self, ttl_minutes: u32, now: DateTime<Utc>) -> bool {
        now - self.fetched_at <= Duration::minutes(i64::from(ttl_minutes))
    }
}

#[derive(Debug)]
pub struct ObservationCache {
    cache_path: PathBuf,
}

impl ObservationCache {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            cache_path: config_dir.join("observations.json"),
        }
    }

    /// Persist a freshly fetched window.
    pub fn store(&self, records: &[WeatherInputRecord]) -> Result<(), HistoryError> {
        let entry = CachedObservations {
            fetched_at: Utc::now(),
            records: records.to_vec(),
        };

        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HistoryError::Cache(format!("create dir: {}", e)))?;
        }

        let json = serde_json::to_string(&entry)
            .map_err(|e| HistoryError::Cache(format!("serialize: {}", e)))?;
        std::fs::write(&self.cache_path, json)
            .map_err(|e| HistoryError::Cache(format!("write: {}", e)))?;

        tracing::debug!("Cached {} observations", records.len());
        Ok(())
    }

    /// Load the cached window, if any.
    pub fn load(&self) -> Result<Option<CachedObservations>, HistoryError> {
        if !self.cache_path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.cache_path)
            .map_err(|e| HistoryError::Cache(format!("read: {}", e)))?;
        let entry: CachedObservations = serde_json::from_str(&contents)
            .map_err(|e| HistoryError::Cache(format!("deserialize: {}", e)))?;

        Ok(Some(entry))
    }

    /// Drop the cached window.
    pub fn clear(&self) -> Result<(), HistoryError> {
        if self.cache_path.exists() {
            std::fs::remove_file(&self.cache_path)
                .map_err(|e| HistoryError::Cache(format!("remove: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::baseline_window;
    use chrono::TimeZone;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ObservationCache::new(dir.path());

        let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let records = baseline_window(24, end);
        cache.store(&records).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.records, records);
    }

    #[test]
    fn missing_cache_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ObservationCache::new(dir.path());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ObservationCache::new(dir.path());

        let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        cache.store(&baseline_window(2, end)).unwrap();
        cache.clear().unwrap();

        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn freshness_follows_ttl() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let entry = CachedObservations {
            fetched_at,
            records: Vec::new(),
        };

        let within = fetched_at + Duration::minutes(30);
        let beyond = fetched_at + Duration::minutes(90);
        assert!(entry.is_fresh(60, within));
        assert!(!entry.is_fresh(60, beyond));
    }
}

//! Centralized application services with mutable state support.
//!
//! A single `AppServices` struct holds the tokio runtime and the adapter
//! clients behind RwLocks, so clients can be re-initialized after a config
//! change and cleared on shutdown.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use metrocast_core::{Config, WindowPreset};
use metrocast_forecast::{PredictionClient, PredictionWindow};
use metrocast_history::{ObservationCache, ObservationsClient};
use metrocast_metrics::MetricsClient;

enum RuntimeHolder {
    /// Runtime owned by the services container (normal operation)
    Owned(tokio::runtime::Runtime),
    /// Handle to a runtime owned by the embedder (tests, custom hosts)
    External(tokio::runtime::Handle),
}

/// Application services container.
///
/// Initialized once at startup; provides mutable access to all shared
/// adapter clients through RwLock.
pub struct AppServices {
    runtime: RuntimeHolder,

    /// Shutdown signal broadcaster
    shutdown_tx: broadcast::Sender<()>,

    /// Prediction service client
    prediction_client: RwLock<Option<Arc<PredictionClient>>>,

    /// Observation export client
    observations_client: RwLock<Option<Arc<ObservationsClient>>>,

    /// Experiment tracking client (absent when not configured)
    metrics_client: RwLock<Option<Arc<MetricsClient>>>,

    /// On-disk cache for the last observation window
    observation_cache: RwLock<Option<Arc<ObservationCache>>>,

    /// Cache TTL in minutes, from config
    cache_minutes: RwLock<u32>,
}

impl AppServices {
    /// Create the services container with its own multi-threaded runtime.
    pub fn new() -> anyhow::Result<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("metrocast-tokio")
            .build()?;

        Ok(Self::build(RuntimeHolder::Owned(runtime)))
    }

    /// Create the services container on an externally owned runtime.
    pub fn with_handle(handle: tokio::runtime::Handle) -> Arc<Self> {
        Self::build(RuntimeHolder::External(handle))
    }

    fn build(runtime: RuntimeHolder) -> Arc<Self> {
        let (shutdown_tx, _) = broadcast::channel(16);

        Arc::new(Self {
            runtime,
            shutdown_tx,
            prediction_client: RwLock::new(None),
            observations_client: RwLock::new(None),
            metrics_client: RwLock::new(None),
            observation_cache: RwLock::new(None),
            cache_minutes: RwLock::new(60),
        })
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        match &self.runtime {
            RuntimeHolder::Owned(rt) => rt.handle().clone(),
            RuntimeHolder::External(handle) => handle.clone(),
        }
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal application shutdown and clear all service references.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");

        let _ = self.shutdown_tx.send(());

        *self.prediction_client.write() = None;
        *self.observations_client.write() = None;
        *self.metrics_client.write() = None;
        *self.observation_cache.write() = None;

        tracing::info!("AppServices shutdown complete");
    }

    /// Initialize every adapter from configuration.
    ///
    /// Returns false when a required client could not be created; the
    /// metrics client is optional and only logged about.
    pub fn init_from_config(&self, config: &Config) -> bool {
        let window = window_from_preset(config.forecast.window);

        let ok = self.init_prediction_client(&config.forecast.api_url, window)
            && self.init_observations_client(
                &config.observations.data_url,
                &config.observations.object_key,
            );

        *self.cache_minutes.write() = config.observations.cache_minutes;
        self.init_observation_cache(config);
        self.init_metrics_client(config);

        ok
    }

    // =========== Prediction client ===========

    pub fn prediction_client(&self) -> Option<Arc<PredictionClient>> {
        self.prediction_client.read().clone()
    }

    pub fn init_prediction_client(&self, base_url: &str, window: PredictionWindow) -> bool {
        match PredictionClient::new(base_url, window) {
            Ok(client) => {
                *self.prediction_client.write() = Some(Arc::new(client));
                tracing::info!(
                    "Prediction client initialized ({} hour window) with base_url: {}",
                    window.hours(),
                    base_url
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to create prediction client: {}", e);
                false
            }
        }
    }

    // =========== Observations client ===========

    pub fn observations_client(&self) -> Option<Arc<ObservationsClient>> {
        self.observations_client.read().clone()
    }

    pub fn init_observations_client(&self, base_url: &str, object_key: &str) -> bool {
        match ObservationsClient::new(base_url, object_key) {
            Ok(client) => {
                *self.observations_client.write() = Some(Arc::new(client));
                tracing::info!("Observations client initialized with base_url: {}", base_url);
                true
            }
            Err(e) => {
                tracing::error!("Failed to create observations client: {}", e);
                false
            }
        }
    }

    pub fn observation_cache(&self) -> Option<Arc<ObservationCache>> {
        self.observation_cache.read().clone()
    }

    pub fn cache_minutes(&self) -> u32 {
        *self.cache_minutes.read()
    }

    fn init_observation_cache(&self, config: &Config) {
        let cache = ObservationCache::new(&config.config_dir);
        *self.observation_cache.write() = Some(Arc::new(cache));
    }

    // =========== Metrics client ===========

    pub fn metrics_client(&self) -> Option<Arc<MetricsClient>> {
        self.metrics_client.read().clone()
    }

    pub fn init_metrics_client(&self, config: &Config) -> bool {
        let Some(api_key) = config.metrics.resolved_api_key() else {
            tracing::info!("Experiment tracking not configured; metrics disabled");
            return false;
        };

        match MetricsClient::new(&config.metrics.entity, &config.metrics.project, &api_key) {
            Ok(client) => {
                *self.metrics_client.write() = Some(Arc::new(client));
                tracing::info!(
                    "Metrics client initialized for {}/{}",
                    config.metrics.entity,
                    config.metrics.project
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to create metrics client: {}", e);
                false
            }
        }
    }

    /// Set a pre-built metrics client (tests, custom endpoints).
    pub fn set_metrics_client(&self, client: Option<Arc<MetricsClient>>) {
        *self.metrics_client.write() = client;
    }
}

/// Map the configured deployment variant onto the adapter's window type.
pub fn window_from_preset(preset: WindowPreset) -> PredictionWindow {
    match preset {
        WindowPreset::Day => PredictionWindow::Day,
        WindowPreset::Week => PredictionWindow::Week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_maps_onto_window() {
        assert_eq!(window_from_preset(WindowPreset::Day).hours(), 24);
        assert_eq!(window_from_preset(WindowPreset::Week).hours(), 168);
    }

    #[tokio::test]
    async fn clients_clear_on_shutdown() {
        let services = AppServices::with_handle(tokio::runtime::Handle::current());
        assert!(services.init_prediction_client("http://localhost:3000", PredictionWindow::Day));
        assert!(services.prediction_client().is_some());

        let mut shutdown_rx = services.subscribe_shutdown();
        services.shutdown();

        assert!(services.prediction_client().is_none());
        assert!(shutdown_rx.try_recv().is_ok());
    }
}

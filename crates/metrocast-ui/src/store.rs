//! The shared dashboard store.
//!
//! One `DashboardStore` holds the full client-side state: the input window,
//! prediction results, console slots and UI selection. Actions either
//! mutate state directly or dispatch an adapter call on the service
//! runtime; adapter completions come back as mpsc messages which
//! `process_pending` applies. Every applied mutation notifies subscribers
//! with a snapshot of the new state. The last response to arrive wins;
//! there is no retry or request ordering beyond that.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use metrocast_forecast::{daily_summary, forecast_hours, PredictionWindow, WeatherInputRecord};
use metrocast_history::{baseline_window, parse_observations, tail_window};
use metrocast_metrics::{HistoryPoint, RunMetrics};

use crate::app_services::AppServices;
use crate::console::{self, ConsoleField};
use crate::services::{
    request_history_fetch, request_metrics_history, request_metrics_summary,
    request_prediction_fetch, HistoryError, HistoryServiceMessage, MetricsError,
    MetricsServiceMessage, PredictionError, PredictionServiceMessage, PredictionTarget,
};
use crate::translations::Language;

/// Metric selected in the forecast chart tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricTab {
    #[default]
    Temperature,
    Precipitation,
    Wind,
}

/// Full client-side state, cloned into subscriber notifications.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Rolling input window, oldest record first
    pub input_history: Vec<WeatherInputRecord>,
    /// Measured temperatures for comparison against the prediction
    pub real_data: Option<Vec<f32>>,
    /// Last prediction curve returned by the service
    pub predictions: Option<Vec<f32>>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// True when the input window came from the on-disk cache
    pub history_from_cache: bool,

    // Selection state
    pub language: Language,
    pub active_tab: MetricTab,
    pub selected_day: usize,
    /// Temperature override shown in the current-conditions card
    pub displayed_temp: Option<f32>,
    /// Data-entry dialog visibility
    pub is_modal_open: bool,

    // Console (request builder)
    pub console_history: Vec<WeatherInputRecord>,
    pub console_predictions: Option<Vec<f32>>,
    pub console_loading: bool,
    pub console_error: Option<String>,

    // Training run metrics
    pub run_metrics: Option<RunMetrics>,
    pub run_history: Vec<HistoryPoint>,
    pub metrics_loading: bool,
    pub metrics_error: Option<String>,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

struct Subscriber {
    id: usize,
    callback: Box<dyn Fn(&DashboardState) + Send + Sync>,
}

pub struct DashboardStore {
    services: Arc<AppServices>,
    state: RwLock<DashboardState>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_subscriber_id: AtomicUsize,

    prediction_tx: Sender<PredictionServiceMessage>,
    prediction_rx: Mutex<Receiver<PredictionServiceMessage>>,
    history_tx: Sender<HistoryServiceMessage>,
    history_rx: Mutex<Receiver<HistoryServiceMessage>>,
    metrics_tx: Sender<MetricsServiceMessage>,
    metrics_rx: Mutex<Receiver<MetricsServiceMessage>>,
}

impl DashboardStore {
    pub fn new(services: Arc<AppServices>) -> Self {
        let (prediction_tx, prediction_rx) = channel();
        let (history_tx, history_rx) = channel();
        let (metrics_tx, metrics_rx) = channel();

        let window = services
            .prediction_client()
            .map(|c| c.window())
            .unwrap_or_default();

        let mut state = DashboardState::default();
        state.console_history = baseline_window(window.hours(), Utc::now());

        Self {
            services,
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
            next_subscriber_id: AtomicUsize::new(1),
            prediction_tx,
            prediction_rx: Mutex::new(prediction_rx),
            history_tx,
            history_rx: Mutex::new(history_rx),
            metrics_tx,
            metrics_rx: Mutex::new(metrics_rx),
        }
    }

    /// Configured input window (falls back to the day variant before the
    /// prediction client is initialized).
    pub fn window(&self) -> PredictionWindow {
        self.services
            .prediction_client()
            .map(|c| c.window())
            .unwrap_or_default()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.state.read().clone()
    }

    /// Read state without cloning.
    pub fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.state.read())
    }

    // =========== Subscriptions ===========

    pub fn subscribe(
        &self,
        callback: impl Fn(&DashboardState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().retain(|s| s.id != id.0);
    }

    /// Apply a mutation, then notify subscribers with the new snapshot.
    fn mutate(&self, f: impl FnOnce(&mut DashboardState)) {
        let snapshot = {
            let mut state = self.state.write();
            f(&mut state);
            state.clone()
        };
        for subscriber in self.subscribers.read().iter() {
            (subscriber.callback)(&snapshot);
        }
    }

    // =========== Direct actions ===========

    /// Replace the entire input window (never a partial merge).
    pub fn set_input_history(&self, history: Vec<WeatherInputRecord>) {
        self.mutate(|s| {
            s.input_history = history;
            s.history_from_cache = false;
            s.error = None;
        });
    }

    pub fn set_real_data(&self, data: Vec<f32>) {
        self.mutate(|s| s.real_data = Some(data));
    }

    pub fn set_language(&self, language: Language) {
        self.mutate(|s| s.language = language);
    }

    pub fn toggle_language(&self) {
        self.mutate(|s| s.language = s.language.toggled());
    }

    pub fn set_active_tab(&self, tab: MetricTab) {
        self.mutate(|s| s.active_tab = tab);
    }

    pub fn set_displayed_temp(&self, temp: Option<f32>) {
        self.mutate(|s| s.displayed_temp = temp);
    }

    pub fn toggle_modal(&self, open: bool) {
        self.mutate(|s| s.is_modal_open = open);
    }

    /// Select a forecast day; its high becomes the displayed temperature.
    pub fn select_day(&self, index: usize) {
        self.mutate(|s| {
            s.selected_day = index;
            if let (Some(predictions), Some(last)) = (&s.predictions, s.input_history.last()) {
                let days = daily_summary(&forecast_hours(last.timestamp, predictions));
                if let Some(day) = days.get(index) {
                    s.displayed_temp = Some(day.high);
                }
            }
        });
    }

    /// Clear predictions, input history, comparison data and error state
    /// in one step.
    pub fn reset(&self) {
        self.mutate(|s| {
            s.input_history.clear();
            s.predictions = None;
            s.real_data = None;
            s.is_loading = false;
            s.error = None;
            s.history_from_cache = false;
            s.displayed_temp = None;
            s.selected_day = 0;
        });
    }

    // =========== Console actions ===========

    /// Replace the console window wholesale.
    pub fn set_console_history(&self, history: Vec<WeatherInputRecord>) {
        self.mutate(|s| {
            s.console_history = history;
            s.console_error = None;
        });
    }

    /// Apply one hand-typed cell edit; out-of-range rows are ignored.
    pub fn update_console_field(&self, index: usize, field: ConsoleField, value: &str) {
        self.mutate(|s| {
            if let Some(record) = s.console_history.get_mut(index) {
                console::apply_field(record, field, value);
            }
        });
    }

    /// Reset the console window to the editable baseline.
    pub fn clear_console(&self) {
        let hours = self.window().hours();
        self.mutate(|s| {
            s.console_history = baseline_window(hours, Utc::now());
            s.console_predictions = None;
            s.console_error = None;
        });
    }

    /// Import a CSV export into the console window.
    ///
    /// Longer exports are trimmed to the most recent window; parse failures
    /// and short exports land in the console error slot. Returns true when
    /// the window was replaced.
    pub fn import_console_csv(&self, text: &str) -> bool {
        let hours = self.window().hours();

        let records = match parse_observations(text) {
            Ok(records) => records,
            Err(e) => {
                self.mutate(|s| s.console_error = Some(format!("CSV error: {}", e)));
                return false;
            }
        };

        match tail_window(&records, hours) {
            Some(window) => {
                let window = window.to_vec();
                self.mutate(|s| {
                    s.console_history = window;
                    s.console_error = None;
                });
                true
            }
            None => {
                self.mutate(|s| {
                    s.console_error = Some(format!(
                        "CSV holds {} records, need {}",
                        records.len(),
                        hours
                    ));
                });
                false
            }
        }
    }

    // =========== Adapter-backed actions ===========

    /// Submit the dashboard input window for inference.
    ///
    /// A window violation is caught here and never reaches the network.
    pub fn fetch_prediction(&self) {
        let history = self.read(|s| s.input_history.clone());

        let Some(client) = self.services.prediction_client() else {
            self.mutate(|s| s.error = Some(PredictionError::NotInitialized.to_string()));
            return;
        };

        if let Err(e) = client.validate_window(&history) {
            let message = reject_message(&e);
            self.mutate(|s| s.error = Some(message));
            return;
        }

        self.mutate(|s| {
            s.is_loading = true;
            s.error = None;
        });

        request_prediction_fetch(
            &self.prediction_tx,
            &self.services.runtime(),
            client,
            PredictionTarget::Dashboard,
            history,
        );
    }

    /// Submit the console window for inference.
    pub fn run_console_inference(&self) {
        let history = self.read(|s| s.console_history.clone());

        let Some(client) = self.services.prediction_client() else {
            self.mutate(|s| s.console_error = Some(PredictionError::NotInitialized.to_string()));
            return;
        };

        if let Err(e) = client.validate_window(&history) {
            let message = reject_message(&e);
            self.mutate(|s| s.console_error = Some(message));
            return;
        }

        self.mutate(|s| {
            s.console_loading = true;
            s.console_error = None;
        });

        request_prediction_fetch(
            &self.prediction_tx,
            &self.services.runtime(),
            client,
            PredictionTarget::Console,
            history,
        );
    }

    /// Load the latest observation window from the export.
    pub fn load_sample_data(&self) {
        let Some(client) = self.services.observations_client() else {
            self.mutate(|s| s.error = Some(HistoryError::NotInitialized.to_string()));
            return;
        };

        self.mutate(|s| {
            s.is_loading = true;
            s.error = None;
        });

        request_history_fetch(
            &self.history_tx,
            &self.services.runtime(),
            client,
            self.services.observation_cache(),
            self.window().hours(),
            self.services.cache_minutes(),
        );
    }

    /// Fetch the latest training run summary for the console.
    pub fn fetch_run_metrics(&self) {
        let Some(client) = self.services.metrics_client() else {
            self.mutate(|s| s.metrics_error = Some(MetricsError::NotConfigured.to_string()));
            return;
        };

        self.mutate(|s| {
            s.metrics_loading = true;
            s.metrics_error = None;
        });

        request_metrics_summary(&self.metrics_tx, &self.services.runtime(), client);
    }

    /// Fetch the sampled training history for the console charts.
    pub fn fetch_run_history(&self) {
        let Some(client) = self.services.metrics_client() else {
            self.mutate(|s| s.metrics_error = Some(MetricsError::NotConfigured.to_string()));
            return;
        };

        self.mutate(|s| {
            s.metrics_loading = true;
            s.metrics_error = None;
        });

        request_metrics_history(&self.metrics_tx, &self.services.runtime(), client);
    }

    // =========== Message application ===========

    /// Apply every pending adapter completion; returns how many were applied.
    pub fn process_pending(&self) -> usize {
        let mut applied = 0;

        let pending: Vec<_> = self.prediction_rx.lock().try_iter().collect();
        for message in pending {
            self.apply_prediction(message);
            applied += 1;
        }

        let pending: Vec<_> = self.history_rx.lock().try_iter().collect();
        for message in pending {
            self.apply_history(message);
            applied += 1;
        }

        let pending: Vec<_> = self.metrics_rx.lock().try_iter().collect();
        for message in pending {
            self.apply_metrics(message);
            applied += 1;
        }

        applied
    }

    fn apply_prediction(&self, message: PredictionServiceMessage) {
        let PredictionServiceMessage::FetchDone(target, result) = message;
        self.mutate(|s| match target {
            PredictionTarget::Dashboard => {
                s.is_loading = false;
                match result {
                    Ok(predictions) => {
                        s.predictions = Some(predictions);
                        s.error = None;
                        // A successful run dismisses the data-entry dialog
                        s.is_modal_open = false;
                    }
                    Err(e) => s.error = Some(e.to_string()),
                }
            }
            PredictionTarget::Console => {
                s.console_loading = false;
                match result {
                    Ok(predictions) => {
                        s.console_predictions = Some(predictions);
                        s.console_error = None;
                    }
                    Err(e) => s.console_error = Some(e.to_string()),
                }
            }
        });
    }

    fn apply_history(&self, message: HistoryServiceMessage) {
        let HistoryServiceMessage::FetchDone(result) = message;
        self.mutate(|s| {
            s.is_loading = false;
            match result {
                Ok(fetch) => {
                    s.input_history = fetch.records;
                    s.history_from_cache = fetch.from_cache;
                    s.error = None;
                }
                Err(e) => s.error = Some(e.to_string()),
            }
        });
    }

    fn apply_metrics(&self, message: MetricsServiceMessage) {
        self.mutate(|s| {
            s.metrics_loading = false;
            match message {
                MetricsServiceMessage::SummaryDone(Ok(metrics)) => {
                    s.run_metrics = metrics;
                    s.metrics_error = None;
                }
                MetricsServiceMessage::HistoryDone(Ok(history)) => {
                    s.run_history = history;
                    s.metrics_error = None;
                }
                MetricsServiceMessage::SummaryDone(Err(e))
                | MetricsServiceMessage::HistoryDone(Err(e)) => {
                    s.metrics_error = Some(e.to_string());
                }
            }
        });
    }
}

fn reject_message(e: &metrocast_forecast::PredictionError) -> String {
    match e {
        metrocast_forecast::PredictionError::WindowMismatch { expected, got } => {
            PredictionError::Rejected {
                expected: *expected,
                got: *got,
            }
            .to_string()
        }
        other => other.to_string(),
    }
}

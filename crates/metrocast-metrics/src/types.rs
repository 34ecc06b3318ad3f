use serde::{Deserialize, Serialize};

/// Summary metrics of the latest finished training run.
///
/// Every numeric field is optional; runs logged by older pipeline versions
/// are missing some keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunMetrics {
    pub loss: Option<f64>,
    pub val_loss: Option<f64>,
    pub mae: Option<f64>,
    pub val_mae: Option<f64>,
    pub epoch: Option<f64>,
    pub state: String,
    pub updated_at: String,
    pub duration: Option<f64>,
    pub total_steps: Option<f64>,
}

/// One sampled point of the training history, keyed by epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub epoch: f64,
    pub loss: f64,
    pub val_mae: f64,
}

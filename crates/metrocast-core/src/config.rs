use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Deployment variant of the prediction service.
///
/// The serving endpoint is exported with a fixed input window; the client
/// must send exactly that many hourly records per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowPreset {
    /// 24-hour input window
    #[default]
    Day,
    /// 168-hour (7-day) input window
    Week,
}

impl WindowPreset {
    /// Number of hourly records the variant expects
    pub fn hours(&self) -> usize {
        match self {
            WindowPreset::Day => 24,
            WindowPreset::Week => 168,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Prediction service settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Historical observation source settings
    #[serde(default)]
    pub observations: ObservationsConfig,

    /// Experiment tracking (training run metrics) settings
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL of the prediction service
    pub api_url: String,

    /// Input window variant the deployed model was exported with
    #[serde(default)]
    pub window: WindowPreset,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            window: WindowPreset::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationsConfig {
    /// Base URL serving the cleaned observation exports (S3 or proxy)
    pub data_url: String,

    /// Object key of the rolling hourly CSV
    pub object_key: String,

    /// Minutes before a cached observation window is considered stale
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u32,
}

fn default_cache_minutes() -> u32 {
    60
}

impl Default for ObservationsConfig {
    fn default() -> Self {
        Self {
            data_url: "https://metrocast-data.s3.eu-central-1.amazonaws.com".to_string(),
            object_key: "istanbul_weather.csv".to_string(),
            cache_minutes: default_cache_minutes(),
        }
    }
}

/// Experiment tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Tracking entity (team or user)
    pub entity: String,
    /// Tracking project name
    pub project: String,
    /// API key (can be set via environment instead)
    pub api_key: Option<String>,
}

impl MetricsConfig {
    /// Check if credentials are available (config or environment)
    pub fn is_configured(&self) -> bool {
        !self.entity.is_empty() && !self.project.is_empty() && self.resolved_api_key().is_some()
    }

    /// API key from config, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("WANDB_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            entity: "metrocast".to_string(),
            project: "metrocast-ai".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Interface language tag ("tr" or "en")
    pub language: String,

    /// Dark mode enabled
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: "tr".to_string(),
            dark_mode: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("metrocast");

        Self {
            config_dir,
            forecast: ForecastConfig::default(),
            observations: ObservationsConfig::default(),
            metrics: MetricsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.api_url, "forecast.api_url", &mut result);
        self.validate_url(
            &self.observations.data_url,
            "observations.data_url",
            &mut result,
        );

        if self.observations.object_key.is_empty() {
            result.add_error("observations.object_key", "Object key must not be empty");
        }

        if self.observations.cache_minutes == 0 {
            result.add_warning(
                "observations.cache_minutes",
                "Observation cache disabled (0 minutes)",
            );
        } else if self.observations.cache_minutes > 1440 {
            result.add_warning(
                "observations.cache_minutes",
                "Observation cache TTL is more than 24 hours",
            );
        }

        match self.ui.language.as_str() {
            "tr" | "en" => {}
            other => {
                result.add_error("ui.language", format!("Unsupported language: {}", other));
            }
        }

        // Metrics are optional; just warn when the console cannot connect
        if !self.metrics.is_configured() {
            result.add_warning(
                "metrics",
                "Experiment tracking not configured - training metrics will be unavailable",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("metrocast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = Config::default();
        config.forecast.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "forecast.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.observations.data_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_unsupported_language() {
        let mut config = Config::default();
        config.ui.language = "de".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "ui.language"));
    }

    #[test]
    fn test_cache_disabled_is_warning() {
        let mut config = Config::default();
        config.observations.cache_minutes = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "observations.cache_minutes"));
    }

    #[test]
    fn test_metrics_not_configured_is_warning() {
        std::env::remove_var("WANDB_API_KEY");
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "metrics"));
    }

    #[test]
    fn test_window_preset_hours() {
        assert_eq!(WindowPreset::Day.hours(), 24);
        assert_eq!(WindowPreset::Week.hours(), 168);
    }

    #[test]
    fn test_window_preset_parses_lowercase() {
        let cfg: ForecastConfig =
            toml::from_str("api_url = \"http://localhost:3000\"\nwindow = \"week\"").unwrap();
        assert_eq!(cfg.window, WindowPreset::Week);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}

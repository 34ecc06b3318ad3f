use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ValidationResult};

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;

        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    /// Create an application instance from an already-loaded config
    pub fn with_config(config: Config) -> Self {
        let validation = config.validate();
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Log startup state and surface configuration warnings
    pub fn initialize(&self) -> Result<()> {
        tracing::info!(
            "Initializing MetroCast client ({} hour window)",
            self.config.forecast.window.hours()
        );

        for warning in &self.validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down MetroCast client");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the application config
    pub fn config_arc(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_keeps_settings() {
        let mut config = Config::default();
        config.ui.language = "en".to_string();
        let app = App::with_config(config);
        assert_eq!(app.config().ui.language, "en");
    }

    #[test]
    fn test_initialize_and_shutdown() {
        let app = App::with_config(Config::default());
        assert!(app.initialize().is_ok());
        assert!(app.shutdown().is_ok());
    }
}

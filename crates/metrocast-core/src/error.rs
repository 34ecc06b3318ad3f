//! Centralized error types for the MetroCast client.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the MetroCast client should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prediction service error: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Observation data error: {0}")]
    History(#[from] HistoryError),

    #[error("Experiment tracking error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Service-level errors that can be mapped from the UI crate.
    #[error("Service error: {0}")]
    Service(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Prediction(e) => e.user_message(),
            AppError::History(e) => e.user_message(),
            AppError::Metrics(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Service(_) => "Something went wrong. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Prediction service errors.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Expected {expected} hourly records, got {got}")]
    WindowMismatch { expected: usize, got: usize },

    #[error("Prediction API error: {0}")]
    ApiError(String),

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),
}

impl PredictionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictionError::WindowMismatch { .. } => {
                "The input window is incomplete. Load a full window of hourly records."
            }
            PredictionError::ApiError(_) => "The prediction request failed. Please try again.",
            PredictionError::ServiceUnavailable => {
                "Prediction service unavailable. Please try again later."
            }
            PredictionError::InvalidResponse(_) => {
                "The prediction service returned unexpected data."
            }
        }
    }
}

/// Historical observation errors (S3 CSV source).
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to fetch observations: {0}")]
    Fetch(String),

    #[error("Malformed observation data: {0}")]
    Malformed(String),

    #[error("No observations available")]
    Empty,

    #[error("Cache error: {0}")]
    Cache(String),
}

impl HistoryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            HistoryError::Fetch(_) => "Failed to load sample data. Please try again.",
            HistoryError::Malformed(_) => "The observation export is malformed.",
            HistoryError::Empty => "No observation data is available yet.",
            HistoryError::Cache(_) => "Observation data may be outdated.",
        }
    }
}

/// Experiment tracking errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Experiment tracking not configured")]
    NotConfigured,

    #[error("Unauthorized - API key may be invalid")]
    Unauthorized,

    #[error("Tracking API error: {0}")]
    ApiError(String),

    #[error("Failed to decode metrics: {0}")]
    Parse(String),
}

impl MetricsError {
    pub fn user_message(&self) -> &'static str {
        match self {
            MetricsError::NotConfigured => "Training metrics are not configured.",
            MetricsError::Unauthorized => "Tracking API key is invalid. Check settings.",
            MetricsError::ApiError(_) => "Failed to load training metrics. Please try again.",
            MetricsError::Parse(_) => "Training metrics could not be decoded.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Ferry ingestion pipeline.

use thiserror::Error;

/// Boxed error used as a chained cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

const APN_DEFAULT_MESSAGE: &str = "apn configuration could not be resolved";

/// Raised when the network configuration (APN) needed to complete a message
/// transport operation cannot be obtained.
///
/// The error is terminal for the attempt that needed the configuration. It
/// carries no retry state; callers decide whether to report or abandon.
#[derive(Debug, Default, Error)]
#[error("{}", .message.as_deref().unwrap_or(APN_DEFAULT_MESSAGE))]
pub struct ConfigResolutionError {
    message: Option<String>,
    #[source]
    cause: Option<BoxError>,
}

impl ConfigResolutionError {
    /// An error with neither message nor cause.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    pub fn with_cause(cause: impl Into<BoxError>) -> Self {
        Self {
            message: None,
            cause: Some(cause.into()),
        }
    }

    pub fn with_message_and_cause(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause.into()),
        }
    }

    /// The detail message, if one was given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The chained cause, if one was given.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

/// The primary error type used across Ferry collaborator traits and operations.
///
/// Configuration file problems are reported separately as
/// `ferry_config::ConfigError` diagnostics.
#[derive(Debug, Error)]
pub enum FerryError {
    /// APN lookup failed for a transport operation.
    #[error("apn resolution failed: {0}")]
    ApnResolution(#[from] ConfigResolutionError),

    /// The platform notification subsystem rejected a post or cancel.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<BoxError>,
    },

    /// The component-enablement subsystem rejected a toggle.
    #[error("component error: {message}")]
    Component {
        message: String,
        source: Option<BoxError>,
    },

    /// The durable message pipeline failed after dispatch.
    #[error("pipeline error: {message}")]
    Pipeline {
        message: String,
        source: Option<BoxError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

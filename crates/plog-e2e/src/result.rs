//! Result and error types for the Plog suite.

use crate::assertion::SoftAssertionError;
use thiserror::Error;

/// Result type for suite operations
pub type E2eResult<T> = Result<T, E2eError>;

/// How a failure should be treated by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The run cannot continue (no browser, bad configuration)
    Setup,
    /// Observed state did not match the expectation
    Assertion,
    /// Element lookup, script, navigation or filesystem trouble
    Infrastructure,
}

/// Errors that can occur while driving the application
#[derive(Debug, Error)]
pub enum E2eError {
    /// Connection to the WebDriver server failed
    #[error("Cannot connect to WebDriver server at {url}: {message}")]
    ConnectionFailed {
        /// WebDriver server URL
        url: String,
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the selector
    #[error("No element matches {selector}")]
    ElementNotFound {
        /// CSS selector
        selector: String,
    },

    /// Any other WebDriver command failure
    #[error("WebDriver command `{command}` failed: {message}")]
    Driver {
        /// Command name
        command: String,
        /// Error message
        message: String,
    },

    /// Script evaluation failed or returned something unexpected
    #[error("Script error: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// What was waited for
        waited_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Hard assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Soft assertions collected during a scenario
    #[error("{0}")]
    SoftFailures(#[from] SoftAssertionError),

    /// Mailbox file could not be read or removed
    #[error("Mailbox error for {path}: {message}")]
    Mailbox {
        /// Mailbox file path
        path: String,
        /// Error message
        message: String,
    },

    /// Notification email did not contain the expected link
    #[error("No {kind} link found in email")]
    LinkNotFound {
        /// Link kind (verify or reset)
        kind: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Invalid regular expression
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl E2eError {
    /// Create a hard assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a driver command failure
    #[must_use]
    pub fn driver(command: impl Into<String>, message: impl ToString) -> Self {
        Self::Driver {
            command: command.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Categorise this error for the harness
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ConnectionFailed { .. } | Self::Config { .. } => ErrorCategory::Setup,
            Self::AssertionFailed { .. } | Self::SoftFailures(_) => ErrorCategory::Assertion,
            _ => ErrorCategory::Infrastructure,
        }
    }

    /// Whether the whole run must stop
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::Setup)
    }
}

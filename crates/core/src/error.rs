//! Error types for the snapask-core library.
//!
//! One granular enum spans the crate so callers can match on the failure
//! mode instead of parsing strings.

use thiserror::Error;

/// Errors that can occur within the snapask-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid values, bad API base).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable is unset.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Grabbing a monitor's pixels failed.
    #[error("Screen capture failed: {0}")]
    ScreenCapture(String),

    /// Requested monitor index was not found.
    #[error("Monitor not found: index {0}")]
    MonitorNotFound(usize),

    /// Image cropping, encoding, or saving failed.
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    /// The selection collapsed to zero area.
    #[error("Selection area is empty or invalid")]
    EmptySelection,

    /// Transport or protocol failure talking to the vision API.
    #[error("Vision API error: {0}")]
    Api(String),

    /// The API responded, but the choices list was empty.
    #[error("Vision API returned no choices")]
    NoAnswer,

    /// A send was attempted before any screenshot was captured.
    #[error("No screenshot captured yet")]
    NoCapture,

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a capture error with the given message.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::ScreenCapture(msg.into())
    }

    /// Creates an imaging error with the given message.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::ImageProcessing(msg.into())
    }

    /// Creates a vision API error with the given message.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

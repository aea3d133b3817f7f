use std::io;
use thiserror::Error;

/// Custom error type for telemetry monitoring
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Metrics source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Sink write failed: {0}")]
    SinkWrite(String),
}

/// Result type alias for telemetry monitoring
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        MonitorError::InvalidConfig(msg.into())
    }

    /// Create a source unavailable error
    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::SourceUnavailable(msg.into())
    }

    /// Create a sink write error
    pub fn sink_write<S: Into<String>>(msg: S) -> Self {
        MonitorError::SinkWrite(msg.into())
    }
}

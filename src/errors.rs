// errors.rs
use thiserror::Error;

/// Run-level failures: loading the vehicle list, writing output, and
/// publishing. Per-record and per-vehicle problems never reach this type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Publish failed: {0}")]
    Publish(String),
}

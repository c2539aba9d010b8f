use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FxError {
    #[error("conversion unavailable: {0}")]
    ConversionUnavailable(String),
}

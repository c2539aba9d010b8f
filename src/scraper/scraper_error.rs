use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Blocked by site: {0}")]
    Blocked(String),
    #[error("Bad selector: {0}")]
    Selector(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

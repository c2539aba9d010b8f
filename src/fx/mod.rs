mod exchangerate_host;
mod fx_error;
mod normalizer;

pub use exchangerate_host::{ExchangeRateHost, DEFAULT_FX_API_URL};
pub use fx_error::FxError;
pub use normalizer::UsdNormalizer;

/// All statistics are reported in this currency.
pub const REPORTING_CURRENCY: &str = "USD";

/// Remote "amount in `from` -> amount in USD" lookup.
pub trait RateProvider {
    fn convert(&self, amount: f64, from: &str) -> Result<f64, FxError>;
}

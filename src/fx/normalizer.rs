// src/fx/normalizer.rs

use crate::fx::{FxError, RateProvider, REPORTING_CURRENCY};
use std::cell::RefCell;
use std::collections::HashMap;

/// Converts sale prices to USD, remembering successful conversions for the
/// run. Failures are not remembered, so a later record with the same
/// currency and amount asks the provider again.
pub struct UsdNormalizer<P> {
    provider: P,
    memo: RefCell<HashMap<(String, u64), f64>>,
}

impl<P: RateProvider> UsdNormalizer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn to_usd(&self, amount: f64, currency: &str) -> Result<f64, FxError> {
        let currency = currency.trim().to_uppercase();
        if currency == REPORTING_CURRENCY {
            return Ok(amount);
        }

        let key = (currency, amount.to_bits());
        if let Some(hit) = self.memo.borrow().get(&key) {
            return Ok(*hit);
        }

        let converted = self.provider.convert(amount, &key.0)?;
        self.memo.borrow_mut().insert(key, converted);
        Ok(converted)
    }

    #[cfg(test)]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

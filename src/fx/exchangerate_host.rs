// src/fx/exchangerate_host.rs

use crate::fx::{FxError, RateProvider, REPORTING_CURRENCY};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_FX_API_URL: &str = "https://api.exchangerate.host/convert";

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Option<f64>,
}

/// Remote converter backed by exchangerate.host's `/convert` endpoint.
pub struct ExchangeRateHost {
    client: Client,
    api_url: String,
}

impl ExchangeRateHost {
    pub fn new(api_url: impl Into<String>) -> Result<Self, FxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FxError::ConversionUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

impl RateProvider for ExchangeRateHost {
    fn convert(&self, amount: f64, from: &str) -> Result<f64, FxError> {
        let amount_param = amount.to_string();
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("from", from),
                ("to", REPORTING_CURRENCY),
                ("amount", amount_param.as_str()),
            ])
            .send()
            .map_err(|e| FxError::ConversionUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FxError::ConversionUnavailable(format!(
                "FX API HTTP {status} for {from} -> {REPORTING_CURRENCY}"
            )));
        }

        let body: ConvertResponse = resp
            .json()
            .map_err(|e| FxError::ConversionUnavailable(e.to_string()))?;

        body.result.ok_or_else(|| {
            FxError::ConversionUnavailable(format!(
                "FX API returned no result for {from} -> {REPORTING_CURRENCY}"
            ))
        })
    }
}

// src/tests/utils.rs

use crate::clock::RunClock;
use crate::domain::{SaleObservation, VehicleRow};
use crate::fx::{FxError, RateProvider};
use crate::scraper::{SaleSource, ScraperError};
use chrono::{NaiveDate, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// 2024-06-01 12:00:00 UTC, the "now" every scenario runs at.
pub fn fixed_clock() -> RunClock {
    RunClock::fixed(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

pub fn vehicle(name: &str, year: i32) -> VehicleRow {
    VehicleRow {
        name: name.to_string(),
        year,
        make: "Porsche".to_string(),
        model: "911".to_string(),
        variant: None,
        classic_market_url: None,
    }
}

pub fn sale(source: &str, date: &str, price: f64, currency: &str, url: &str) -> SaleObservation {
    let placeholder = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let mut s = SaleObservation::new(source, placeholder, price, currency).with_url(url);
    s.sale_date = date.to_string();
    s
}

/// Hands back the same sales for every vehicle whose name it knows.
pub struct CannedSource {
    pub name: &'static str,
    pub sales: Vec<(String, Vec<SaleObservation>)>,
}

impl SaleSource for CannedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch_sales(
        &self,
        vehicle: &VehicleRow,
        _today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        Ok(self
            .sales
            .iter()
            .find(|(name, _)| *name == vehicle.name)
            .map(|(_, sales)| sales.clone())
            .unwrap_or_default())
    }
}

pub struct BrokenSource;

impl SaleSource for BrokenSource {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn fetch_sales(
        &self,
        _vehicle: &VehicleRow,
        _today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        Err(ScraperError::Network("connection reset".to_string()))
    }
}

/// EUR at 1.1 and GBP at 1.25; anything else is unavailable. Counts calls.
#[derive(Clone, Default)]
pub struct TableRates {
    pub calls: Rc<Cell<usize>>,
}

impl RateProvider for TableRates {
    fn convert(&self, amount: f64, from: &str) -> Result<f64, FxError> {
        self.calls.set(self.calls.get() + 1);
        match from {
            "EUR" => Ok(amount * 1.1),
            "GBP" => Ok(amount * 1.25),
            other => Err(FxError::ConversionUnavailable(format!("no rate for {other}"))),
        }
    }
}

/// Every conversion fails.
pub struct NoRates;

impl RateProvider for NoRates {
    fn convert(&self, _amount: f64, from: &str) -> Result<f64, FxError> {
        Err(FxError::ConversionUnavailable(format!("{from}: service down")))
    }
}

/// Times out on its first call, then converts EUR at 1.1.
#[derive(Default)]
pub struct FailsFirstCall {
    pub calls: Cell<usize>,
}

impl RateProvider for FailsFirstCall {
    fn convert(&self, amount: f64, from: &str) -> Result<f64, FxError> {
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() == 1 {
            return Err(FxError::ConversionUnavailable(format!("{from}: timed out")));
        }
        Ok(amount * 1.1)
    }
}

// src/domain/sale.rs

use chrono::NaiveDate;
use serde::Serialize;

/// ISO `YYYY-MM-DD`, the only date shape sources hand to the aggregator.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single reported sale, exactly as a source produced it.
///
/// `sale_date` stays textual: sources normalise to ISO, but a value that
/// does not parse is dropped by the window filter rather than rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleObservation {
    pub sale_date: String,
    pub price: f64,
    pub currency: String,
    pub source: String,
    pub auction_house: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
}

impl SaleObservation {
    pub fn new(
        source: impl Into<String>,
        sale_date: NaiveDate,
        price: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            sale_date: sale_date.format(SALE_DATE_FORMAT).to_string(),
            price,
            currency: currency.into().to_uppercase(),
            source: source.into(),
            auction_house: None,
            location: None,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_auction_house(mut self, house: impl Into<String>) -> Self {
        self.auction_house = Some(house.into());
        self
    }

    /// `None` when the date is missing or not a real calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_sale_date(&self.sale_date)
    }
}

/// Only the canonical `YYYY-MM-DD` spelling is accepted, so that comparing
/// two accepted dates as strings orders them by calendar date. Padded or
/// unpadded variants (`" 2024-05-01"`, `"2024-5-1"`) are malformed.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, SALE_DATE_FORMAT).ok()?;
    (date.format(SALE_DATE_FORMAT).to_string() == raw).then_some(date)
}

/// A sale inside the 5-year history, with its price in USD when the
/// conversion succeeded. Field order matches the published JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSale {
    pub sale_date: String,
    pub price: f64,
    pub currency: String,
    pub price_usd: Option<f64>,
    pub source: String,
    pub auction_house: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
}

impl EnrichedSale {
    pub fn new(sale: &SaleObservation, price_usd: Option<f64>) -> Self {
        Self {
            sale_date: sale.sale_date.clone(),
            price: sale.price,
            currency: sale.currency.clone(),
            price_usd,
            source: sale.source.clone(),
            auction_house: sale.auction_house.clone(),
            location: sale.location.clone(),
            url: sale.url.clone(),
        }
    }
}

/// Anything the window filter can place on the calendar.
pub trait Dated {
    fn sale_date(&self) -> &str;
}

impl Dated for SaleObservation {
    fn sale_date(&self) -> &str {
        &self.sale_date
    }
}

impl Dated for EnrichedSale {
    fn sale_date(&self) -> &str {
        &self.sale_date
    }
}

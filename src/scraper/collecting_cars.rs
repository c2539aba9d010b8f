// collecting_cars.rs
use crate::domain::{SaleObservation, VehicleRow};
use crate::scraper::{SaleSource, ScraperError};
use chrono::NaiveDate;

/// Collecting Cars is registered as a source but has no scraper yet; it
/// always reports no sales.
pub struct CollectingCars;

impl SaleSource for CollectingCars {
    fn name(&self) -> &'static str {
        "collecting_cars"
    }

    fn fetch_sales(
        &self,
        _vehicle: &VehicleRow,
        _today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        Ok(Vec::new())
    }
}

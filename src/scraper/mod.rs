mod bring_a_trailer;
mod classic_com;
mod collecting_cars;
mod fetcher;
mod scraper_error;
mod text;

pub use bring_a_trailer::BringATrailer;
pub use classic_com::ClassicCom;
pub use collecting_cars::CollectingCars;
pub use fetcher::PageFetcher;
pub use scraper_error::ScraperError;

use crate::domain::{SaleObservation, VehicleRow};
use chrono::NaiveDate;

/// One auction or marketplace site that can report past sales.
///
/// `today` is the run's date; sources that print two-digit years need it to
/// pick a century.
pub trait SaleSource {
    fn name(&self) -> &'static str;

    fn fetch_sales(
        &self,
        vehicle: &VehicleRow,
        today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError>;
}

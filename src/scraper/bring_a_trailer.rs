// bring_a_trailer.rs
use crate::domain::{SaleObservation, VehicleRow};
use crate::scraper::text::{
    element_text, first_link, skip_required_ws, starts_with_ci, take_digits, take_grouped_number,
};
use crate::scraper::{PageFetcher, SaleSource, ScraperError};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use scraper::{Html, Selector};
use url::Url;

const SOURCE_NAME: &str = "bring_a_trailer";
const AUCTION_HOUSE: &str = "Bring a Trailer";
const SITE_ROOT: &str = "https://bringatrailer.com/";
const RESULTS_PATH: &str = "https://bringatrailer.com/auctions/results/";
const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

/// Scrapes the Bring a Trailer results search for a vehicle.
pub struct BringATrailer {
    fetcher: PageFetcher,
    max_results: usize,
    include_bid_to: bool,
}

impl BringATrailer {
    pub fn new(fetcher: PageFetcher, max_results: usize, include_bid_to: bool) -> Self {
        Self {
            fetcher,
            max_results,
            include_bid_to,
        }
    }

    /// `year make model [variant]`, skipping blank parts.
    pub fn build_query(vehicle: &VehicleRow) -> String {
        let year = vehicle.year.to_string();
        [
            Some(year.as_str()),
            Some(vehicle.make.as_str()),
            Some(vehicle.model.as_str()),
            vehicle.variant.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn results_url(vehicle: &VehicleRow) -> Result<Url, ScraperError> {
        let query = Self::build_query(vehicle);
        Url::parse_with_params(RESULTS_PATH, &[("search", query.as_str()), ("sort", "recent")])
            .map_err(|e| ScraperError::Config(e.to_string()))
    }

    /// Turns a results page into sale observations, at most `max_results`.
    pub fn parse_results_page(
        &self,
        html: &str,
        today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        let document = Html::parse_document(html);
        let cards = Selector::parse("article").map_err(|e| ScraperError::Selector(e.to_string()))?;
        let links = Selector::parse("a[href]").map_err(|e| ScraperError::Selector(e.to_string()))?;
        let base = Url::parse(SITE_ROOT).map_err(|e| ScraperError::Config(e.to_string()))?;

        let mut sales = Vec::new();

        for (idx, card) in document.select(&cards).enumerate() {
            if sales.len() >= self.max_results {
                break;
            }

            let text = element_text(card);
            let Some(line) = parse_result_line(&text) else {
                continue;
            };

            if line.bid_only && !self.include_bid_to {
                continue;
            }

            let Some(sale_date) = line.sale_date(today) else {
                debug!("{SOURCE_NAME} card {idx}: invalid date {}/{}/{:02}", line.month, line.day, line.yy);
                continue;
            };
            let Ok(price) = line.price.parse::<f64>() else {
                debug!("{SOURCE_NAME} card {idx}: unreadable price {:?}", line.price);
                continue;
            };

            let mut sale = SaleObservation::new(SOURCE_NAME, sale_date, price, line.currency)
                .with_auction_house(AUCTION_HOUSE);
            if let Some(url) = first_link(card, &links, &base) {
                sale = sale.with_url(url);
            }
            sales.push(sale);
        }

        Ok(sales)
    }
}

impl SaleSource for BringATrailer {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn fetch_sales(
        &self,
        vehicle: &VehicleRow,
        today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        let url = Self::results_url(vehicle)?;
        info!("scraping {AUCTION_HOUSE}: {url}");

        let html = self.fetcher.fetch_html(url.as_str())?;
        self.parse_results_page(&html, today)
    }
}

/// The outcome line of one results card, before the date is resolved.
#[derive(Debug, PartialEq)]
struct ResultLine {
    bid_only: bool,
    currency: &'static str,
    price: String,
    month: u32,
    day: u32,
    yy: u32,
}

impl ResultLine {
    fn sale_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(expand_two_digit_year(self.yy, today), self.month, self.day)
    }
}

/// Sliding century window: years up to this year's two digits belong to the
/// current century, the rest to the previous one. Ambiguous for sales more
/// than a hundred years old or across a century turn.
pub fn expand_two_digit_year(yy: u32, today: NaiveDate) -> i32 {
    let current_year = today.year();
    let century = current_year.div_euclid(100) * 100;
    let yy = yy as i32;

    if yy <= current_year.rem_euclid(100) {
        century + yy
    } else {
        century - 100 + yy
    }
}

/// Finds the leftmost `(Sold for|Bid to) CCY <junk>1,234 on M/D/YY`.
fn parse_result_line(text: &str) -> Option<ResultLine> {
    let bytes = text.as_bytes();

    (0..bytes.len()).find_map(|pos| {
        if starts_with_ci(bytes, pos, "sold for") {
            parse_after_status(bytes, pos + "sold for".len(), false)
        } else if starts_with_ci(bytes, pos, "bid to") {
            parse_after_status(bytes, pos + "bid to".len(), true)
        } else {
            None
        }
    })
}

fn parse_after_status(bytes: &[u8], pos: usize, bid_only: bool) -> Option<ResultLine> {
    let pos = skip_required_ws(bytes, pos)?;
    let currency = CURRENCIES
        .into_iter()
        .find(|ccy| starts_with_ci(bytes, pos, ccy))?;
    let mut pos = skip_required_ws(bytes, pos + currency.len())?;

    while bytes.get(pos).is_some_and(|b| !b.is_ascii_digit()) {
        pos += 1;
    }
    let (price, pos) = take_grouped_number(bytes, pos)?;

    let pos = skip_required_ws(bytes, pos)?;
    if !starts_with_ci(bytes, pos, "on") {
        return None;
    }
    let pos = skip_required_ws(bytes, pos + 2)?;

    let (month, pos) = take_digits(bytes, pos, 1, 2)?;
    let pos = expect_slash(bytes, pos)?;
    let (day, pos) = take_digits(bytes, pos, 1, 2)?;
    let pos = expect_slash(bytes, pos)?;
    let (yy, _) = take_digits(bytes, pos, 2, 2)?;

    Some(ResultLine {
        bid_only,
        currency,
        price,
        month,
        day,
        yy,
    })
}

fn expect_slash(bytes: &[u8], pos: usize) -> Option<usize> {
    (bytes.get(pos) == Some(&b'/')).then_some(pos + 1)
}

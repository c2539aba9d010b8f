// classic_com.rs
use crate::domain::{SaleObservation, VehicleRow};
use crate::scraper::text::{element_text, first_link, skip_required_ws, take_digits, take_grouped_number};
use crate::scraper::{PageFetcher, SaleSource, ScraperError};
use chrono::NaiveDate;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const SOURCE_NAME: &str = "classic_com";
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Scrapes a Classic.com market page. Vehicles without a market URL in the
/// vehicle list get no Classic.com sales.
pub struct ClassicCom {
    fetcher: PageFetcher,
}

impl ClassicCom {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    pub fn parse_market_page(
        html: &str,
        market_url: &str,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        let document = Html::parse_document(html);
        let divs = Selector::parse("div").map_err(|e| ScraperError::Selector(e.to_string()))?;
        let links = Selector::parse("a[href]").map_err(|e| ScraperError::Selector(e.to_string()))?;
        let base = Url::parse(market_url).map_err(|e| ScraperError::Config(e.to_string()))?;

        let mut sales = Vec::new();

        for (idx, card) in sold_cards(&document, &divs).into_iter().enumerate() {
            let Some(SoldCard { currency, price, sale_date }) = read_card(&element_text(card)) else {
                continue;
            };
            let Ok(price) = price.parse::<f64>() else {
                debug!("{SOURCE_NAME} card {idx}: unreadable price {price:?}");
                continue;
            };

            let mut sale = SaleObservation::new(SOURCE_NAME, sale_date, price, currency);
            if let Some(url) = first_link(card, &links, &base) {
                sale = sale.with_url(url);
            }
            sales.push(sale);
        }

        Ok(sales)
    }
}

impl SaleSource for ClassicCom {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn fetch_sales(
        &self,
        vehicle: &VehicleRow,
        _today: NaiveDate,
    ) -> Result<Vec<SaleObservation>, ScraperError> {
        let Some(market_url) = vehicle.classic_market_url.as_deref() else {
            return Ok(Vec::new());
        };
        info!("scraping Classic.com: {market_url}");

        let html = self.fetcher.fetch_html(market_url)?;
        Self::parse_market_page(&html, market_url)
    }
}

struct SoldCard {
    currency: &'static str,
    price: String,
    sale_date: NaiveDate,
}

fn read_card(text: &str) -> Option<SoldCard> {
    if !text.to_ascii_lowercase().contains("sold") {
        return None;
    }
    let (currency, price) = find_price(text)?;
    let sale_date = find_date(text)?;
    Some(SoldCard {
        currency,
        price,
        sale_date,
    })
}

/// Innermost `div`s that read as a complete sold card. Outer wrappers
/// repeat their children's text, so they are left out.
fn sold_cards<'a>(document: &'a Html, divs: &Selector) -> Vec<ElementRef<'a>> {
    let is_card = |el: ElementRef<'_>| read_card(&element_text(el)).is_some();

    document
        .select(divs)
        .filter(|div| is_card(*div))
        .filter(|div| {
            !div.select(divs)
                .any(|inner| inner.id() != div.id() && is_card(inner))
        })
        .collect()
}

/// First `$`, `€` or `£` followed by digits, as (currency, plain digits).
fn find_price(text: &str) -> Option<(&'static str, String)> {
    let bytes = text.as_bytes();

    text.char_indices().find_map(|(pos, ch)| {
        let currency = match ch {
            '$' => "USD",
            '€' => "EUR",
            '£' => "GBP",
            _ => return None,
        };
        let (digits, _) = take_grouped_number(bytes, pos + ch.len_utf8())?;
        Some((currency, digits))
    })
}

/// First `Mon D, YYYY` in the text, case-sensitive on the month.
fn find_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();

    (0..bytes.len()).find_map(|pos| {
        let month = MONTHS
            .iter()
            .position(|m| bytes.get(pos..pos + 3) == Some(m.as_bytes()))?;
        let at = skip_required_ws(bytes, pos + 3)?;
        let (day, at) = take_digits(bytes, at, 1, 2)?;
        if bytes.get(at) != Some(&b',') {
            return None;
        }
        let at = skip_required_ws(bytes, at + 1)?;
        let (year, _) = take_digits(bytes, at, 4, 4)?;

        NaiveDate::from_ymd_opt(year as i32, month as u32 + 1, day)
    })
}

// src/market/stats.rs

use crate::domain::{EnrichedSale, MarketStats, SaleObservation, VehicleIdentity, VehiclePayload};
use crate::fx::{RateProvider, UsdNormalizer};
use crate::market::filter_last_n_years;
use crate::market::window::{datable, window_positions, Undatable};
use chrono::NaiveDate;
use log::{debug, warn};

pub const HISTORY_YEARS: u32 = 5;
pub const RECENT_YEARS: u32 = 1;

/// Builds the payload for one vehicle from its already-deduplicated sales.
///
/// Nothing here fails: a missing conversion leaves `price_usd` empty and the
/// sale out of the 1-year average, an empty window gives the zero sentinel.
/// Record indexes in the log refer to positions in `sales`.
pub fn build_vehicle_payload<P: RateProvider>(
    identity: &VehicleIdentity,
    sales: &[SaleObservation],
    today: NaiveDate,
    fx: &UsdNormalizer<P>,
) -> VehiclePayload {
    report_undatable(identity, sales, today);

    let sales_5y: Vec<EnrichedSale> = window_positions(sales, HISTORY_YEARS, today)
        .into_iter()
        .map(|idx| {
            let sale = &sales[idx];
            let price_usd = match fx.to_usd(sale.price, &sale.currency) {
                Ok(usd) => Some(usd),
                Err(e) => {
                    warn!(
                        "{identity}: record {idx} from {} ({}): {} {} not converted: {e}",
                        sale.source, sale.sale_date, sale.price, sale.currency
                    );
                    None
                }
            };
            EnrichedSale::new(sale, price_usd)
        })
        .collect();

    // 1 year is inside 5 years, so every recent sale was converted above.
    let prices_1y_usd: Vec<f64> = filter_last_n_years(&sales_5y, RECENT_YEARS, today)
        .into_iter()
        .filter_map(|sale| sale.price_usd)
        .collect();

    let (last_sale_price_usd, last_sale_date) = match last_sale(&sales_5y) {
        Some(last) => (last.price_usd, Some(last.sale_date.clone())),
        None => (None, None),
    };

    VehiclePayload {
        identity: identity.clone(),
        stats: MarketStats {
            avg_price_1y_usd: mean(&prices_1y_usd),
            sample_size_1y: prices_1y_usd.len(),
            last_sale_price_usd,
            last_sale_date,
        },
        sales_5y,
    }
}

fn report_undatable(identity: &VehicleIdentity, sales: &[SaleObservation], today: NaiveDate) {
    for (idx, sale) in sales.iter().enumerate() {
        let reason = match datable(&sale.sale_date, today) {
            Ok(_) => continue,
            Err(Undatable::Unparseable) => "unparseable",
            Err(Undatable::Future) => "future",
        };
        debug!(
            "{identity}: record {idx} from {}: {reason} sale date {:?}, dropped",
            sale.source, sale.sale_date
        );
    }
}

/// Latest ISO date wins; among equal dates the earliest entry is kept.
pub fn last_sale(sales: &[EnrichedSale]) -> Option<&EnrichedSale> {
    sales.iter().fold(None, |best: Option<&EnrichedSale>, sale| match best {
        Some(b) if sale.sale_date <= b.sale_date => Some(b),
        _ => Some(sale),
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::FxError;
    use approx::assert_relative_eq;

    /// EUR converts at 1.1, everything else is unavailable.
    struct EurOnly;

    impl RateProvider for EurOnly {
        fn convert(&self, amount: f64, from: &str) -> Result<f64, FxError> {
            match from {
                "EUR" => Ok(amount * 1.1),
                other => Err(FxError::ConversionUnavailable(format!("no rate for {other}"))),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn identity() -> VehicleIdentity {
        VehicleIdentity {
            display_name: "Porsche 911 Carrera RS".to_string(),
            year: 1973,
            make: "Porsche".to_string(),
            model: "911".to_string(),
            variant: Some("Carrera RS".to_string()),
        }
    }

    fn sale(date: &str, price: f64, ccy: &str) -> SaleObservation {
        let mut s = SaleObservation::new("A", today(), price, ccy);
        s.sale_date = date.to_string();
        s
    }

    fn enriched(date: &str, price_usd: Option<f64>) -> EnrichedSale {
        EnrichedSale::new(&sale(date, 1.0, "USD"), price_usd)
    }

    #[test]
    fn averages_the_converted_one_year_window() {
        let sales = vec![
            sale("2024-03-01", 100_000.0, "USD"),
            sale("2023-12-01", 200_000.0, "EUR"),
            sale("2021-01-01", 50_000.0, "USD"),
        ];
        let payload = build_vehicle_payload(&identity(), &sales, today(), &UsdNormalizer::new(EurOnly));

        assert_eq!(payload.stats.sample_size_1y, 2);
        assert_relative_eq!(payload.stats.avg_price_1y_usd, 160_000.0, max_relative = 1e-12);
        assert_eq!(payload.sales_5y.len(), 3);
        assert_eq!(payload.stats.last_sale_date.as_deref(), Some("2024-03-01"));
        assert_eq!(payload.stats.last_sale_price_usd, Some(100_000.0));
    }

    #[test]
    fn failed_conversion_stays_in_history_but_not_in_the_average() {
        let sales = vec![sale("2024-01-01", 90_000.0, "GBP")];
        let payload = build_vehicle_payload(&identity(), &sales, today(), &UsdNormalizer::new(EurOnly));

        assert_eq!(payload.stats.sample_size_1y, 0);
        assert_eq!(payload.stats.avg_price_1y_usd, 0.0);
        assert_eq!(payload.sales_5y.len(), 1);
        assert_eq!(payload.sales_5y[0].price_usd, None);
        assert_eq!(payload.stats.last_sale_date.as_deref(), Some("2024-01-01"));
        assert_eq!(payload.stats.last_sale_price_usd, None);
    }

    #[test]
    fn empty_recent_window_gives_zero_sentinel() {
        let sales = vec![sale("2020-01-01", 10_000.0, "USD")];
        let payload = build_vehicle_payload(&identity(), &sales, today(), &UsdNormalizer::new(EurOnly));

        assert_eq!(payload.stats.avg_price_1y_usd, 0.0);
        assert_eq!(payload.stats.sample_size_1y, 0);
        assert_eq!(payload.sales_5y.len(), 1);
    }

    #[test]
    fn nothing_in_five_years_leaves_last_sale_empty() {
        let sales = vec![sale("2001-01-01", 10_000.0, "USD"), sale("bad", 1.0, "USD")];
        let payload = build_vehicle_payload(&identity(), &sales, today(), &UsdNormalizer::new(EurOnly));

        assert_eq!(payload.stats, MarketStats::empty());
        assert!(payload.sales_5y.is_empty());
    }

    #[test]
    fn padded_date_cannot_win_last_sale() {
        let sales = vec![sale("2021-01-01", 10_000.0, "USD"), sale(" 2024-05-01", 20_000.0, "USD")];
        let payload = build_vehicle_payload(&identity(), &sales, today(), &UsdNormalizer::new(EurOnly));

        let dates: Vec<_> = payload.sales_5y.iter().map(|s| s.sale_date.as_str()).collect();
        assert_eq!(dates, vec!["2021-01-01"]);
        assert_eq!(payload.stats.last_sale_date.as_deref(), Some("2021-01-01"));
        assert_eq!(payload.stats.last_sale_price_usd, Some(10_000.0));
    }

    #[test]
    fn each_sale_is_converted_once_per_payload() {
        struct Counting(std::cell::Cell<usize>);

        impl RateProvider for Counting {
            fn convert(&self, _amount: f64, _from: &str) -> Result<f64, FxError> {
                self.0.set(self.0.get() + 1);
                Err(FxError::ConversionUnavailable("down".to_string()))
            }
        }

        let sales = vec![sale("2024-05-01", 1.0, "EUR"), sale("2022-05-01", 2.0, "EUR")];
        let fx = UsdNormalizer::new(Counting(std::cell::Cell::new(0)));
        let payload = build_vehicle_payload(&identity(), &sales, today(), &fx);

        assert_eq!(payload.stats.sample_size_1y, 0);
        assert!(payload.sales_5y.iter().all(|s| s.price_usd.is_none()));
        assert_eq!(fx.provider().0.get(), 2);
    }

    #[test]
    fn last_sale_picks_the_latest_date() {
        let sales = vec![
            enriched("2021-01-01", Some(1.0)),
            enriched("2023-06-15", Some(2.0)),
            enriched("2022-09-09", Some(3.0)),
        ];
        let last = last_sale(&sales).unwrap();

        assert_eq!(last.sale_date, "2023-06-15");
        assert_eq!(last.price_usd, Some(2.0));
    }

    #[test]
    fn last_sale_ties_keep_the_first_entry() {
        let sales = vec![
            enriched("2023-06-15", None),
            enriched("2023-06-15", Some(2.0)),
        ];

        assert_eq!(last_sale(&sales).unwrap().price_usd, None);
        assert!(last_sale(&[]).is_none());
    }
}

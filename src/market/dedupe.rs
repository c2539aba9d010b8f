// src/market/dedupe.rs

use crate::domain::SaleObservation;
use std::collections::HashSet;

/// What makes two observations "the same sale". Sources are part of the key,
/// so one sale reported by two sites survives as two observations.
#[derive(Debug, PartialEq, Eq, Hash)]
struct SaleKey {
    source: String,
    url: String,
    sale_date: String,
    price_cents: i64,
    currency: String,
}

impl SaleKey {
    fn of(sale: &SaleObservation) -> Self {
        Self {
            source: sale.source.clone(),
            url: sale.url.clone().unwrap_or_default(),
            sale_date: sale.sale_date.clone(),
            price_cents: (sale.price * 100.0).round() as i64,
            currency: sale.currency.to_uppercase(),
        }
    }
}

/// Keeps the first occurrence of every distinct sale, in arrival order.
pub fn dedupe_sales(sales: Vec<SaleObservation>) -> Vec<SaleObservation> {
    let mut seen = HashSet::new();
    sales
        .into_iter()
        .filter(|sale| seen.insert(SaleKey::of(sale)))
        .collect()
}

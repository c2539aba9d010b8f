// src/market/window.rs

use crate::domain::{parse_sale_date, Dated};
use chrono::{Duration, NaiveDate};

/// A trailing window is `years * 365` days, not calendar years.
pub fn window_cutoff(today: NaiveDate, years: u32) -> NaiveDate {
    today - Duration::days(i64::from(years) * 365)
}

/// Why a sale can never fall inside any window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undatable {
    Unparseable,
    Future,
}

/// Checks a raw sale date against `today`.
pub fn datable(raw: &str, today: NaiveDate) -> Result<NaiveDate, Undatable> {
    let date = parse_sale_date(raw).ok_or(Undatable::Unparseable)?;
    if date > today {
        return Err(Undatable::Future);
    }
    Ok(date)
}

/// Indexes of the sales dated within `[today - years*365 days, today]`.
pub fn window_positions<T: Dated>(sales: &[T], years: u32, today: NaiveDate) -> Vec<usize> {
    let cutoff = window_cutoff(today, years);

    sales
        .iter()
        .enumerate()
        .filter(|(_, sale)| datable(sale.sale_date(), today).is_ok_and(|date| date >= cutoff))
        .map(|(idx, _)| idx)
        .collect()
}

/// Sales dated within `[today - years*365 days, today]`, in input order.
///
/// Unparseable dates and dates after `today` never pass, whatever the window.
pub fn filter_last_n_years<T: Dated>(sales: &[T], years: u32, today: NaiveDate) -> Vec<&T> {
    window_positions(sales, years, today)
        .into_iter()
        .map(|idx| &sales[idx])
        .collect()
}

// clock.rs
use chrono::{DateTime, NaiveDate, Utc};

/// The moment a run started. Captured once so both sale windows, the
/// two-digit-year rule and the snapshot stamp all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunClock {
    now: DateTime<Utc>,
}

impl RunClock {
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }

    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

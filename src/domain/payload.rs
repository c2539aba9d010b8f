// src/domain/payload.rs

use crate::domain::{EnrichedSale, VehicleIdentity};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Summary figures for one vehicle, all in USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStats {
    pub avg_price_1y_usd: f64,
    pub sample_size_1y: usize,
    pub last_sale_price_usd: Option<f64>,
    pub last_sale_date: Option<String>,
}

impl MarketStats {
    pub fn empty() -> Self {
        Self {
            avg_price_1y_usd: 0.0,
            sample_size_1y: 0,
            last_sale_price_usd: None,
            last_sale_date: None,
        }
    }
}

/// The per-vehicle result of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePayload {
    #[serde(flatten)]
    pub identity: VehicleIdentity,
    pub stats: MarketStats,
    pub sales_5y: Vec<EnrichedSale>,
}

/// Every vehicle payload of a run, stamped with the run's capture time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(serialize_with = "serialize_generated_at")]
    pub generated_at: DateTime<Utc>,
    pub vehicle_count: usize,
    pub vehicles: Vec<VehiclePayload>,
}

pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

fn serialize_generated_at<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&at.format(GENERATED_AT_FORMAT))
}

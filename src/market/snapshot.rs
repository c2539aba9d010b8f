// src/market/snapshot.rs

use crate::domain::{Snapshot, VehiclePayload};
use chrono::{DateTime, Utc};

/// Folds a run's payloads into one snapshot.
///
/// `None` means there is nothing to publish; a zero-vehicle snapshot is
/// never produced.
pub fn assemble_snapshot(
    payloads: Vec<VehiclePayload>,
    generated_at: DateTime<Utc>,
) -> Option<Snapshot> {
    if payloads.is_empty() {
        return None;
    }

    Some(Snapshot {
        generated_at,
        vehicle_count: payloads.len(),
        vehicles: payloads,
    })
}

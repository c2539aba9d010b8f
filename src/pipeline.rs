// pipeline.rs
use crate::clock::RunClock;
use crate::domain::{SaleObservation, Snapshot, VehiclePayload, VehicleRow};
use crate::fx::{RateProvider, UsdNormalizer};
use crate::market::{assemble_snapshot, build_vehicle_payload, dedupe_sales};
use crate::output::write_vehicle_payload;
use crate::scraper::SaleSource;
use log::{info, warn};
use std::path::PathBuf;

/// What one run produced. `snapshot` is `None` when no vehicle had sales.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot: Option<Snapshot>,
    pub vehicles_seen: usize,
    pub vehicles_skipped: usize,
}

/// Drives every vehicle through sources, dedup and statistics, one at a time.
pub struct Pipeline<P> {
    sources: Vec<Box<dyn SaleSource>>,
    fx: UsdNormalizer<P>,
    clock: RunClock,
    out_dir: Option<PathBuf>,
}

impl<P: RateProvider> Pipeline<P> {
    pub fn new(sources: Vec<Box<dyn SaleSource>>, fx: UsdNormalizer<P>, clock: RunClock) -> Self {
        Self {
            sources,
            fx,
            clock,
            out_dir: None,
        }
    }

    /// Also write each vehicle's payload as JSON into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn run(&self, vehicles: &[VehicleRow]) -> RunReport {
        info!("processing {} vehicles", vehicles.len());

        let mut payloads = Vec::new();
        for vehicle in vehicles {
            if let Some(payload) = self.process_vehicle(vehicle) {
                payloads.push(payload);
            }
        }

        let vehicles_skipped = vehicles.len() - payloads.len();
        let snapshot = assemble_snapshot(payloads, self.clock.captured_at());
        if snapshot.is_none() {
            info!("no vehicles produced results");
        }

        RunReport {
            snapshot,
            vehicles_seen: vehicles.len(),
            vehicles_skipped,
        }
    }

    /// `None` when no source reported anything for the vehicle.
    pub fn process_vehicle(&self, vehicle: &VehicleRow) -> Option<VehiclePayload> {
        let identity = vehicle.identity();
        info!("processing {identity}");

        let all_sales = self.collect_sales(vehicle);
        if all_sales.is_empty() {
            info!("no sales found for {identity}");
            return None;
        }

        let sales = dedupe_sales(all_sales);
        info!("{identity}: {} sales after de-duplication", sales.len());

        let payload = build_vehicle_payload(&identity, &sales, self.clock.today(), &self.fx);

        if let Some(dir) = &self.out_dir {
            match write_vehicle_payload(dir, &payload) {
                Ok(path) => info!("wrote {}", path.display()),
                Err(e) => warn!("could not write payload for {identity}: {e}"),
            }
        }

        Some(payload)
    }

    /// Arrival order: sources in registration order, each source's sales as
    /// it reported them. A failing source contributes nothing.
    fn collect_sales(&self, vehicle: &VehicleRow) -> Vec<SaleObservation> {
        let today = self.clock.today();
        let mut all_sales = Vec::new();

        for source in &self.sources {
            match source.fetch_sales(vehicle, today) {
                Ok(sales) => {
                    info!("{}: {} sales from {}", vehicle.name, sales.len(), source.name());
                    all_sales.extend(sales);
                }
                Err(e) => warn!("{}: source {} unavailable: {e}", vehicle.name, source.name()),
            }
        }

        all_sales
    }
}

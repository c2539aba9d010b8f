pub mod payload;
pub mod sale;
pub mod vehicle;

pub use payload::{MarketStats, Snapshot, VehiclePayload};
pub use sale::{parse_sale_date, Dated, EnrichedSale, SaleObservation};
pub use vehicle::{VehicleIdentity, VehicleRow};

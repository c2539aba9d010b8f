mod dedupe;
mod snapshot;
mod stats;
mod window;

pub use dedupe::dedupe_sales;
pub use snapshot::assemble_snapshot;
pub use stats::{build_vehicle_payload, RECENT_YEARS};
pub use window::filter_last_n_years;

mod aggregator;
mod breakdown;
mod series;

pub use aggregator::{aggregate, aggregate_trials};
pub use breakdown::compute_breakdown;
pub use series::assemble;

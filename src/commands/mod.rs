mod breakdown;
mod scaling;

pub use breakdown::{run_breakdown, BreakdownReport};
pub use scaling::{run_scaling, ScalingOptions, ScalingReport};

mod breakdown;
mod grid;
mod sample;
mod series;

pub use breakdown::{BreakdownEntry, PhaseCounter, PhaseCounters, OTHER_LABEL};
pub use grid::{CellAggregate, GridCell, GridShape, LatencySpread, LoadParameter};
pub use sample::{ExtractionReport, Sample};
pub use series::{Series, SeriesPoint};

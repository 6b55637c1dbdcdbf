pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod processors;
pub mod utils;

// 주요 기능 재내보내기(re-exporting)
pub use error::{AnalysisError, RunError};
pub use models::{
    BreakdownEntry, CellAggregate, GridCell, GridShape, LoadParameter, PhaseCounters, Sample,
    Series,
};
pub use parsers::extract;
pub use processors::{aggregate, assemble, compute_breakdown};

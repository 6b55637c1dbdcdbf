use crate::models::GridCell;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the extraction/aggregation core.
///
/// All of them are deterministic: retrying with the same input fails the
/// same way, so callers decide whether to abort the run or skip a cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("no client samples for cell {cell}")]
    InsufficientData { cell: GridCell },

    #[error(
        "phase counters ({phase_sum}) exceed the round total ({total}) by {}",
        .phase_sum - .total
    )]
    BreakdownIntegrity {
        total: f64,
        phase_sum: f64,
        other: f64,
    },

    #[error("declared grid is missing {} cell(s): {}", .missing.len(), format_cells(.missing))]
    IncompleteGrid { missing: Vec<GridCell> },

    #[error("duplicate aggregate for cell {cell}")]
    DuplicateCell { cell: GridCell },

    #[error("round total must be a positive number, got {0}")]
    InvalidTotal(f64),

    #[error("phase '{label}' has invalid value {value}")]
    InvalidPhaseValue { label: String, value: f64 },

    #[error("phase '{0}' is listed more than once")]
    DuplicatePhase(String),

    #[error("phase label '{0}' is reserved for the residual entry")]
    ReservedPhaseLabel(String),
}

fn format_cells(cells: &[GridCell]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised at the boundary: manifests, phase files, trial logs, and
/// core failures surfaced through a command run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid log pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("log pattern '{0}' matched no files")]
    NoMatch(String),

    #[error("cell {0} lists no trial logs")]
    EmptyCell(GridCell),

    #[error("invalid load parameter {0}: must be a positive number")]
    InvalidLoadParameter(f64),

    #[error("invalid concurrency level {0}: must be positive")]
    InvalidConcurrencyLevel(u32),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl RunError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            path: path.into(),
            source,
        }
    }
}

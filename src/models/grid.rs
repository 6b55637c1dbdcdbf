use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Experiment-wide load parameter (μ).
///
/// Wraps an `f64` so it can key ordered maps; values are validated to be
/// finite and positive at the configuration boundary, so the total order of
/// `f64::total_cmp` agrees with numeric order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(transparent)]
pub struct LoadParameter(pub f64);

impl LoadParameter {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for LoadParameter {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LoadParameter {}

impl PartialOrd for LoadParameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LoadParameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for LoadParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for LoadParameter {
    fn from(value: f64) -> Self {
        LoadParameter(value)
    }
}

impl fmt::Display for LoadParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 정수 값은 소수점 없이 출력 (μ = 100)
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One (load parameter, concurrency level) point of the experiment grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub load_parameter: LoadParameter,
    pub concurrency_level: u32,
}

impl GridCell {
    pub fn new(load_parameter: impl Into<LoadParameter>, concurrency_level: u32) -> Self {
        Self {
            load_parameter: load_parameter.into(),
            concurrency_level,
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(μ = {}, users = {})",
            self.load_parameter, self.concurrency_level
        )
    }
}

/// Declared grid: the cartesian product of load parameters and concurrency levels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GridShape {
    pub load_parameters: Vec<LoadParameter>,
    pub concurrency_levels: Vec<u32>,
}

impl GridShape {
    pub fn new(load_parameters: Vec<LoadParameter>, concurrency_levels: Vec<u32>) -> Self {
        Self {
            load_parameters,
            concurrency_levels,
        }
    }

    /// All declared cells in ascending (load, concurrency) order, without duplicates.
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells: Vec<GridCell> = self
            .load_parameters
            .iter()
            .flat_map(|&load| {
                self.concurrency_levels
                    .iter()
                    .map(move |&level| GridCell::new(load, level))
            })
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }
}

/// Spread of one cell's samples, reported next to the mean.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatencySpread {
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
    pub p99_ms: f64,
    pub std_dev_ms: f64,
}

/// Representative latency of one grid cell.
///
/// Only produced for cells with at least one client sample, so the mean is
/// always defined.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CellAggregate {
    pub cell: GridCell,
    pub sample_count: usize,
    pub representative_latency_ms: f64,
    pub spread: LatencySpread,
}

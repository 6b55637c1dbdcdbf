use super::grid::LoadParameter;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub concurrency_level: u32,
    pub latency_ms: f64,
}

/// Latency-vs-users curve for a single load parameter, sorted by ascending
/// concurrency level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Series {
    pub load_parameter: LoadParameter,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Legend label used by the chart and report, e.g. `μ = 100`.
    pub fn label(&self) -> String {
        format!("μ = {}", self.load_parameter)
    }

    pub fn xs(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.concurrency_level).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.latency_ms).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

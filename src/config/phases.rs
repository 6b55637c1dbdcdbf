use super::read_json;
use crate::error::RunError;
use crate::models::PhaseCounters;
use serde::Deserialize;
use std::path::Path;

/// One phase measured on several servers or stages.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseSource {
    pub label: String,
    pub components: Vec<f64>,
}

impl PhaseSource {
    pub fn raw_value(&self) -> f64 {
        self.components.iter().sum()
    }
}

/// Externally measured phase counters for one round.
///
/// ```json
/// { "title": "mu = 100,000", "total": 375058,
///   "phases": [ { "label": "Network", "components": [42028, 72816, 33627, 64318] } ] }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseFile {
    #[serde(default)]
    pub title: Option<String>,
    pub total: f64,
    pub phases: Vec<PhaseSource>,
}

impl PhaseFile {
    pub fn load(path: &Path) -> Result<Self, RunError> {
        read_json(path)
    }

    /// Phase counters in file order, each the sum of its components.
    pub fn counters(&self) -> PhaseCounters {
        self.phases
            .iter()
            .map(|phase| (phase.label.clone(), phase.raw_value()))
            .collect()
    }
}

use serde::{Deserialize, Serialize};

/// Synthetic label for round time not covered by any named phase.
pub const OTHER_LABEL: &str = "Other";

/// A named raw time measurement accumulated across one round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseCounter {
    pub label: String,
    pub raw_value: f64,
}

impl PhaseCounter {
    pub fn new(label: impl Into<String>, raw_value: f64) -> Self {
        Self {
            label: label.into(),
            raw_value,
        }
    }
}

/// Ordered phase counters. Order is the caller's and is kept in the output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PhaseCounters {
    counters: Vec<PhaseCounter>,
}

impl PhaseCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, raw_value: f64) -> &mut Self {
        self.counters.push(PhaseCounter::new(label, raw_value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseCounter> {
        self.counters.iter()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.counters.iter().map(|c| c.raw_value).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PhaseCounters {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            counters: iter
                .into_iter()
                .map(|(label, value)| PhaseCounter::new(label, value))
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    pub label: String,
    pub raw_value: f64,
    pub percentage: f64,
}

impl BreakdownEntry {
    pub fn is_other(&self) -> bool {
        self.label == OTHER_LABEL
    }

    /// Legend text, e.g. `Network 56.12%`.
    pub fn legend_label(&self) -> String {
        format!("{} {:.2}%", self.label, self.percentage)
    }
}

use crate::error::AnalysisError;
use crate::models::{CellAggregate, GridCell, LatencySpread, Sample};
use crate::utils::constants::TAIL_PERCENTILE;
use std::cmp::Ordering;

// 통계 계산을 위한 헬퍼 구조체
struct LatencyStats {
    values: Vec<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl LatencyStats {
    fn from_samples(samples: &[Sample]) -> Self {
        let mut stats = Self {
            values: Vec::with_capacity(samples.len()),
            sum: 0.0,
            min: f64::MAX,
            max: f64::MIN,
        };
        for sample in samples {
            stats.add(sample.latency_ms);
        }
        // 백분위수 계산을 위해 한 번만 정렬
        stats
            .values
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        stats
    }

    fn add(&mut self, value: f64) {
        self.values.push(value);
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self) -> f64 {
        self.sum / self.values.len() as f64
    }

    fn median(&self) -> f64 {
        let mid = self.values.len() / 2;
        if self.values.len() % 2 == 0 {
            (self.values[mid - 1] + self.values[mid]) / 2.0
        } else {
            self.values[mid]
        }
    }

    // nearest-rank on the sorted values
    fn percentile(&self, p: f64) -> f64 {
        let idx = (p / 100.0 * (self.values.len() - 1) as f64).round() as usize;
        self.values[idx.min(self.values.len() - 1)]
    }

    fn std_dev(&self) -> f64 {
        if self.values.len() <= 1 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|&v| {
                let diff = mean - v;
                diff * diff
            })
            .sum::<f64>()
            / (self.values.len() - 1) as f64;
        variance.sqrt()
    }
}

/// Reduces one cell's client samples to its representative latency.
///
/// The representative value is the real-valued arithmetic mean. A cell with
/// no samples fails with [`AnalysisError::InsufficientData`] instead of
/// reporting zero.
pub fn aggregate(cell: GridCell, samples: &[Sample]) -> Result<CellAggregate, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InsufficientData { cell });
    }

    let stats = LatencyStats::from_samples(samples);
    Ok(CellAggregate {
        cell,
        sample_count: samples.len(),
        representative_latency_ms: stats.mean(),
        spread: LatencySpread {
            min_ms: stats.min,
            max_ms: stats.max,
            median_ms: stats.median(),
            p99_ms: stats.percentile(TAIL_PERCENTILE),
            std_dev_ms: stats.std_dev(),
        },
    })
}

/// Aggregates a cell whose samples come from several repeated trials.
pub fn aggregate_trials<I>(cell: GridCell, trials: I) -> Result<CellAggregate, AnalysisError>
where
    I: IntoIterator<Item = Vec<Sample>>,
{
    let samples: Vec<Sample> = trials.into_iter().flatten().collect();
    aggregate(cell, &samples)
}

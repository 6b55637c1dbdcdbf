use crate::error::AnalysisError;
use crate::models::{CellAggregate, GridCell, GridShape, LoadParameter, Series, SeriesPoint};
use std::collections::{BTreeMap, HashSet};

/// Groups cell aggregates into one series per load parameter.
///
/// With `expected` set (strict mode) every declared cell must have an
/// aggregate, otherwise [`AnalysisError::IncompleteGrid`] lists the missing
/// ones. Without it (best-effort mode) whatever cells exist are used. Points
/// are sorted by ascending concurrency level in both modes, and series come
/// back in ascending load order.
pub fn assemble(
    aggregates: &[CellAggregate],
    expected: Option<&GridShape>,
) -> Result<BTreeMap<LoadParameter, Series>, AnalysisError> {
    let mut present: HashSet<GridCell> = HashSet::with_capacity(aggregates.len());
    for aggregate in aggregates {
        if !present.insert(aggregate.cell) {
            return Err(AnalysisError::DuplicateCell {
                cell: aggregate.cell,
            });
        }
    }

    if let Some(shape) = expected {
        let missing: Vec<GridCell> = shape
            .cells()
            .into_iter()
            .filter(|cell| !present.contains(cell))
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::IncompleteGrid { missing });
        }
    }

    let mut series: BTreeMap<LoadParameter, Series> = BTreeMap::new();
    for aggregate in aggregates {
        let load = aggregate.cell.load_parameter;
        series
            .entry(load)
            .or_insert_with(|| Series {
                load_parameter: load,
                points: Vec::new(),
            })
            .points
            .push(SeriesPoint {
                concurrency_level: aggregate.cell.concurrency_level,
                latency_ms: aggregate.representative_latency_ms,
            });
    }

    for s in series.values_mut() {
        s.points.sort_by_key(|p| p.concurrency_level);
    }

    Ok(series)
}

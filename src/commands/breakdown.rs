use crate::config::PhaseFile;
use crate::error::RunError;
use crate::log;
use crate::models::BreakdownEntry;
use crate::processors::compute_breakdown;

#[derive(Debug, Clone)]
pub struct BreakdownReport {
    pub title: Option<String>,
    pub total: f64,
    pub entries: Vec<BreakdownEntry>,
}

/// Computes the round-time breakdown of an externally measured phase file.
pub fn run_breakdown(phase_file: &PhaseFile) -> Result<BreakdownReport, RunError> {
    log!("\n===== Starting round time breakdown =====\n");

    let counters = phase_file.counters();
    log!(
        "{} phases, total {} ms, phases sum {} ms",
        counters.len(),
        phase_file.total,
        counters.sum()
    );

    let entries = compute_breakdown(phase_file.total, &counters)?;

    Ok(BreakdownReport {
        title: phase_file.title.clone(),
        total: phase_file.total,
        entries,
    })
}

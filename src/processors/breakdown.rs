use crate::error::AnalysisError;
use crate::models::{BreakdownEntry, PhaseCounters, OTHER_LABEL};
use std::collections::HashSet;

fn validate(total: f64, phases: &PhaseCounters) -> Result<(), AnalysisError> {
    if !total.is_finite() || total <= 0.0 {
        return Err(AnalysisError::InvalidTotal(total));
    }

    let mut seen = HashSet::with_capacity(phases.len());
    for phase in phases.iter() {
        if phase.label == OTHER_LABEL {
            return Err(AnalysisError::ReservedPhaseLabel(phase.label.clone()));
        }
        if !seen.insert(phase.label.as_str()) {
            return Err(AnalysisError::DuplicatePhase(phase.label.clone()));
        }
        if !phase.raw_value.is_finite() || phase.raw_value < 0.0 {
            return Err(AnalysisError::InvalidPhaseValue {
                label: phase.label.clone(),
                value: phase.raw_value,
            });
        }
    }
    Ok(())
}

/// Splits a round total into per-phase percentages plus a residual "Other".
///
/// Entries keep the caller's phase order with "Other" last. Counters that add
/// up to more than the total fail with
/// [`AnalysisError::BreakdownIntegrity`]; an overshoot within floating-point
/// rounding of the sum is reported as an "Other" of zero.
pub fn compute_breakdown(
    total: f64,
    phases: &PhaseCounters,
) -> Result<Vec<BreakdownEntry>, AnalysisError> {
    validate(total, phases)?;

    let phase_sum = phases.sum();
    let mut other = total - phase_sum;
    if other < 0.0 {
        // rounding bound of summing the phases and subtracting from the total
        let rounding = total * f64::EPSILON * (phases.len() + 1) as f64;
        if other < -rounding {
            return Err(AnalysisError::BreakdownIntegrity {
                total,
                phase_sum,
                other,
            });
        }
        other = 0.0;
    }

    let percentage = |raw: f64| raw / total * 100.0;
    let mut entries: Vec<BreakdownEntry> = phases
        .iter()
        .map(|phase| BreakdownEntry {
            label: phase.label.clone(),
            raw_value: phase.raw_value,
            percentage: percentage(phase.raw_value),
        })
        .collect();
    entries.push(BreakdownEntry {
        label: OTHER_LABEL.to_string(),
        raw_value: other,
        percentage: percentage(other),
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(values: &[(&str, f64)]) -> PhaseCounters {
        values.iter().map(|&(label, value)| (label, value)).collect()
    }

    fn percentage_sum(entries: &[BreakdownEntry]) -> f64 {
        entries.iter().map(|e| e.percentage).sum()
    }

    #[test]
    fn test_breakdown_with_residual() {
        let entries = compute_breakdown(1000.0, &phases(&[("A", 200.0), ("B", 300.0)])).unwrap();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "Other"]);
        assert!((entries[0].percentage - 20.0).abs() < 1e-9);
        assert!((entries[1].percentage - 30.0).abs() < 1e-9);
        assert!((entries[2].percentage - 50.0).abs() < 1e-9);
        assert_eq!(entries[2].raw_value, 500.0);
        assert!((percentage_sum(&entries) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_overcount_is_an_integrity_error() {
        let err = compute_breakdown(100.0, &phases(&[("A", 60.0), ("B", 60.0)])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::BreakdownIntegrity {
                total: 100.0,
                phase_sum: 120.0,
                other: -20.0,
            }
        );
    }

    #[test]
    fn test_small_overcount_of_large_total_is_an_integrity_error() {
        let err = compute_breakdown(10_000_000.0, &phases(&[("A", 10_000_005.0)])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::BreakdownIntegrity {
                total: 10_000_000.0,
                phase_sum: 10_000_005.0,
                other: -5.0,
            }
        );

        let err = compute_breakdown(
            375058.0,
            &phases(&[("Network", 375000.0), ("Apply", 59.0)]),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::BreakdownIntegrity { .. }));
    }

    #[test]
    fn test_exact_total_leaves_zero_other() {
        let entries = compute_breakdown(100.0, &phases(&[("A", 60.0), ("B", 40.0)])).unwrap();
        let other = entries.last().unwrap();
        assert!(other.is_other());
        assert_eq!(other.raw_value, 0.0);
        assert_eq!(other.percentage, 0.0);
    }

    #[test]
    fn test_float_noise_overshoot_is_tolerated() {
        let entries = compute_breakdown(0.3, &phases(&[("A", 0.1), ("B", 0.2)])).unwrap();
        assert_eq!(entries.last().unwrap().raw_value, 0.0);
        assert!((percentage_sum(&entries) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_phases_is_all_other() {
        let entries = compute_breakdown(42.0, &PhaseCounters::new()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, OTHER_LABEL);
        assert_eq!(entries[0].percentage, 100.0);
    }

    #[test]
    fn test_order_follows_caller() {
        let entries = compute_breakdown(
            10.0,
            &phases(&[("Zeta", 1.0), ("Alpha", 2.0), ("Mid", 3.0)]),
        )
        .unwrap();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid", "Other"]);
    }

    #[test]
    fn test_round_measurement() {
        // mu = 100k round measured across all servers
        let mut counters = PhaseCounters::new();
        counters
            .push("Network", 42028.0 + 72816.0 + 33627.0 + 64318.0)
            .push("Apply", 85.0 + 88.0 + 181.0 + 180.0 + 283.0 + 275.0)
            .push("Inverse", 25.0 + 58.0 + 81.0)
            .push("Sample", 183.0 + 371.0 + 551.0)
            .push("Forward Decrypt", 0.0 + 20271.0 + 39948.0)
            .push("Forward Noise", 63469.0 + 30295.0 + 297.0)
            .push("Backwards Re-Encrypt", 135.0 + 290.0 + 626.0);
        let entries = compute_breakdown(375058.0, &counters).unwrap();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].legend_label(), "Network 56.73%");
        let other = entries.last().unwrap();
        assert_eq!(other.raw_value, 375058.0 - counters.sum());
        assert!(other.raw_value >= 0.0);
        assert!((percentage_sum(&entries) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            compute_breakdown(0.0, &PhaseCounters::new()).unwrap_err(),
            AnalysisError::InvalidTotal(0.0)
        );
        assert!(matches!(
            compute_breakdown(f64::NAN, &PhaseCounters::new()),
            Err(AnalysisError::InvalidTotal(_))
        ));
        assert_eq!(
            compute_breakdown(10.0, &phases(&[("A", -1.0)])).unwrap_err(),
            AnalysisError::InvalidPhaseValue {
                label: "A".to_string(),
                value: -1.0
            }
        );
        assert_eq!(
            compute_breakdown(10.0, &phases(&[("A", 1.0), ("A", 2.0)])).unwrap_err(),
            AnalysisError::DuplicatePhase("A".to_string())
        );
        assert_eq!(
            compute_breakdown(10.0, &phases(&[("Other", 1.0)])).unwrap_err(),
            AnalysisError::ReservedPhaseLabel("Other".to_string())
        );
    }
}

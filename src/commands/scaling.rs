use crate::config::{CellInputs, GridManifest};
use crate::error::{AnalysisError, RunError};
use crate::models::{CellAggregate, ExtractionReport, GridCell, LoadParameter, Series};
use crate::parsers::extract_file;
use crate::processors::{aggregate_trials, assemble};
use crate::{log, log_warn};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Boundary policy for a scaling run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalingOptions {
    /// Ignore the manifest's declared grid and assemble whatever cells exist.
    pub best_effort: bool,
    /// Drop cells without client samples instead of aborting the run.
    pub skip_empty: bool,
}

#[derive(Debug, Clone)]
pub struct ScalingReport {
    pub title: Option<String>,
    pub aggregates: Vec<CellAggregate>,
    pub series: BTreeMap<LoadParameter, Series>,
    pub skipped: Vec<GridCell>,
    pub extraction: ExtractionReport,
}

struct CellOutcome {
    result: Result<CellAggregate, AnalysisError>,
    extraction: ExtractionReport,
}

// 셀 하나의 모든 트라이얼 로그를 순서대로 읽어 집계
fn process_cell(input: &CellInputs) -> Result<CellOutcome, RunError> {
    let mut trials = Vec::with_capacity(input.paths.len());
    let mut extraction = ExtractionReport::default();

    for path in &input.paths {
        let (samples, file_report) = extract_file(path).map_err(|e| RunError::io(path, e))?;
        log!(
            "  {} {}: {} client samples, {} admin records dropped, {} malformed",
            input.cell,
            path.display(),
            file_report.client_records,
            file_report.admin_records,
            file_report.malformed_records
        );
        extraction.merge(&file_report);
        trials.push(samples);
    }

    Ok(CellOutcome {
        result: aggregate_trials(input.cell, trials),
        extraction,
    })
}

/// Runs extraction, aggregation and series assembly for a grid manifest.
///
/// Cells are processed in parallel; results are collected in manifest order
/// so identical inputs give identical reports.
pub fn run_scaling(
    manifest: &GridManifest,
    base_dir: &Path,
    options: &ScalingOptions,
) -> Result<ScalingReport, RunError> {
    log!("\n===== Starting scaling analysis =====\n");
    let total_start = Instant::now();

    log!("[1/3] Resolving trial logs...");
    let inputs = manifest.resolve(base_dir)?;
    let file_count: usize = inputs.iter().map(|i| i.paths.len()).sum();
    log!("{} cells, {} log files", inputs.len(), file_count);

    log!("\n[2/3] Extracting and aggregating samples...");
    let stage_start = Instant::now();
    let outcomes: Vec<CellOutcome> = inputs
        .par_iter()
        .map(process_cell)
        .collect::<Result<_, _>>()?;

    let mut aggregates = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    let mut extraction = ExtractionReport::default();
    for outcome in outcomes {
        extraction.merge(&outcome.extraction);
        match outcome.result {
            Ok(aggregate) => {
                log!(
                    "  {}: {} samples, mean {:.3} ms",
                    aggregate.cell,
                    aggregate.sample_count,
                    aggregate.representative_latency_ms
                );
                aggregates.push(aggregate);
            }
            Err(AnalysisError::InsufficientData { cell }) if options.skip_empty => {
                log_warn!("Skipping {cell}: no client samples");
                skipped.push(cell);
            }
            Err(e) => return Err(e.into()),
        }
    }
    log!(
        "Aggregation completed in {:.2}s",
        stage_start.elapsed().as_secs_f64()
    );

    log!("\n[3/3] Assembling series...");
    let expected = if options.best_effort {
        None
    } else {
        manifest.grid.as_ref()
    };
    if expected.is_some() {
        log!("Declared grid found, every cell is required");
    }
    let series = assemble(&aggregates, expected)?;
    log!("{} series assembled", series.len());

    log!(
        "\n===== Scaling analysis finished in {:.2}s =====",
        total_start.elapsed().as_secs_f64()
    );

    Ok(ScalingReport {
        title: manifest.title.clone(),
        aggregates,
        series,
        skipped,
        extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn trial_log(records: &[(u64, u64)]) -> String {
        records
            .iter()
            .map(|(origin, latency)| format!("{origin}\nROUND TIME ELAPSED (ms): {latency}\n"))
            .collect()
    }

    fn setup(name: &str, files: &[(&str, String)]) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    fn manifest(json: &str) -> GridManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_run_scaling_best_effort() {
        let dir = setup(
            "roundtrace_scaling_best_effort",
            &[
                ("c10.log", trial_log(&[(0, 2000), (1, 40), (2, 60)])),
                ("c50-1.log", trial_log(&[(3, 100)])),
                ("c50-2.log", trial_log(&[(4, 200), (0, 9)])),
            ],
        );
        let manifest = manifest(
            r#"{ "cells": [
                { "load_parameter": 100, "concurrency_level": 50, "logs": ["c50-*.log"] },
                { "load_parameter": 100, "concurrency_level": 10, "logs": ["c10.log"] }
            ] }"#,
        );

        let report = run_scaling(&manifest, &dir, &ScalingOptions::default()).unwrap();
        assert_eq!(report.aggregates.len(), 2);
        assert_eq!(report.extraction.client_records, 4);
        assert_eq!(report.extraction.admin_records, 2);

        let series = &report.series[&LoadParameter(100.0)];
        assert_eq!(series.xs(), vec![10, 50]);
        assert_eq!(series.ys(), vec![50.0, 150.0]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_cell_aborts_by_default() {
        let dir = setup(
            "roundtrace_scaling_empty_abort",
            &[("admin.log", trial_log(&[(0, 10)]))],
        );
        let manifest = manifest(
            r#"{ "cells": [ { "load_parameter": 200, "concurrency_level": 10, "logs": ["admin.log"] } ] }"#,
        );
        let err = run_scaling(&manifest, &dir, &ScalingOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RunError::Analysis(AnalysisError::InsufficientData { .. })
        ));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_skipped_cell_breaks_strict_grid() {
        let dir = setup(
            "roundtrace_scaling_skip_strict",
            &[
                ("admin.log", trial_log(&[(0, 10)])),
                ("ok.log", trial_log(&[(5, 10)])),
            ],
        );
        let manifest = manifest(
            r#"{
                "grid": { "load_parameters": [100], "concurrency_levels": [10, 50] },
                "cells": [
                    { "load_parameter": 100, "concurrency_level": 10, "logs": ["ok.log"] },
                    { "load_parameter": 100, "concurrency_level": 50, "logs": ["admin.log"] }
                ]
            }"#,
        );
        let options = ScalingOptions {
            skip_empty: true,
            ..Default::default()
        };
        let err = run_scaling(&manifest, &dir, &options).unwrap_err();
        match err {
            RunError::Analysis(AnalysisError::IncompleteGrid { missing }) => {
                assert_eq!(missing, vec![GridCell::new(100.0, 50)]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let options = ScalingOptions {
            skip_empty: true,
            best_effort: true,
        };
        let report = run_scaling(&manifest, &dir, &options).unwrap();
        assert_eq!(report.skipped, vec![GridCell::new(100.0, 50)]);
        assert_eq!(report.series[&LoadParameter(100.0)].xs(), vec![10]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_log_file() {
        let dir = setup("roundtrace_scaling_missing_file", &[]);
        let manifest = manifest(
            r#"{ "cells": [ { "load_parameter": 100, "concurrency_level": 10, "logs": ["gone.log"] } ] }"#,
        );
        assert!(matches!(
            run_scaling(&manifest, &dir, &ScalingOptions::default()),
            Err(RunError::Io { .. })
        ));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_scaling_is_repeatable() {
        let dir = setup(
            "roundtrace_scaling_repeatable",
            &[
                ("a.log", trial_log(&[(1, 13), (2, 17), (3, 29)])),
                ("b.log", trial_log(&[(1, 7), (2, 11)])),
            ],
        );
        let manifest = manifest(
            r#"{
                "grid": { "load_parameters": [100, 300], "concurrency_levels": [10] },
                "cells": [
                    { "load_parameter": 300, "concurrency_level": 10, "logs": ["a.log", "b.log"] },
                    { "load_parameter": 100, "concurrency_level": 10, "logs": ["b.log"] }
                ]
            }"#,
        );
        let first = run_scaling(&manifest, &dir, &ScalingOptions::default()).unwrap();
        let second = run_scaling(&manifest, &dir, &ScalingOptions::default()).unwrap();
        assert_eq!(first.series, second.series);
        assert_eq!(first.aggregates, second.aggregates);
        fs::remove_dir_all(&dir).ok();
    }
}

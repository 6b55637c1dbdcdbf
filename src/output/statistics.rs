use crate::commands::{BreakdownReport, ScalingReport};
use crate::log;

pub fn print_scaling_statistics(report: &ScalingReport) {
    if let Some(title) = &report.title {
        log!("\n[{}]", title);
    }
    log!(
        "Round records: {} client, {} administrative (dropped), {} malformed",
        report.extraction.client_records,
        report.extraction.admin_records,
        report.extraction.malformed_records
    );

    // 셀별 지연 시간 통계
    log!("\n[Cell latency statistics (ms)]");
    log!("mu\tusers\tsamples\tmean\tmin\tmedian\tp99\tmax\tstd_dev");
    let mut aggregates: Vec<_> = report.aggregates.iter().collect();
    aggregates.sort_by_key(|a| a.cell);
    for aggregate in aggregates {
        let spread = &aggregate.spread;
        log!(
            "{}\t{}\t{}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
            aggregate.cell.load_parameter,
            aggregate.cell.concurrency_level,
            aggregate.sample_count,
            aggregate.representative_latency_ms,
            spread.min_ms,
            spread.median_ms,
            spread.p99_ms,
            spread.max_ms,
            spread.std_dev_ms
        );
    }

    if !report.skipped.is_empty() {
        log!("\nSkipped cells without client samples:");
        for cell in &report.skipped {
            log!("  {}", cell);
        }
    }

    // 시리즈별 평균 지연 시간 (차트 데이터와 동일)
    log!("\n[Latency vs number of users]");
    for series in report.series.values() {
        let points: Vec<String> = series
            .points
            .iter()
            .map(|p| format!("{}: {:.3}", p.concurrency_level, p.latency_ms))
            .collect();
        log!("{}\t{}", series.label(), points.join(", "));
    }
}

pub fn print_breakdown_statistics(report: &BreakdownReport) {
    log!(
        "\n[{}]",
        report.title.as_deref().unwrap_or("Round time breakdown")
    );
    log!("Total round time: {} ms", report.total);
    log!("Phase\tRaw (ms)\tShare");
    for entry in &report.entries {
        log!(
            "{}\t{}\t{:.2}%",
            entry.label,
            entry.raw_value,
            entry.percentage
        );
    }
    let total_pct: f64 = report.entries.iter().map(|e| e.percentage).sum();
    log!("Sum of shares: {:.4}%", total_pct);
}

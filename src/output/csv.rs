use crate::models::{BreakdownEntry, CellAggregate};
use csv::Writer;
use std::error::Error;
use std::fs::File;

/// CSV export of per-cell aggregates, sorted by (mu, users)
pub fn save_scaling_to_csv(
    aggregates: &[CellAggregate],
    output_prefix: &str,
) -> Result<String, Box<dyn Error>> {
    let filename = format!("{}_scaling.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "load_parameter",
        "concurrency_level",
        "samples",
        "mean_ms",
        "min_ms",
        "median_ms",
        "p99_ms",
        "max_ms",
        "std_dev_ms",
    ])?;

    let mut sorted: Vec<&CellAggregate> = aggregates.iter().collect();
    sorted.sort_by_key(|a| a.cell);
    for aggregate in sorted {
        writer.write_record(&[
            aggregate.cell.load_parameter.to_string(),
            aggregate.cell.concurrency_level.to_string(),
            aggregate.sample_count.to_string(),
            aggregate.representative_latency_ms.to_string(),
            aggregate.spread.min_ms.to_string(),
            aggregate.spread.median_ms.to_string(),
            aggregate.spread.p99_ms.to_string(),
            aggregate.spread.max_ms.to_string(),
            aggregate.spread.std_dev_ms.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(filename)
}

/// CSV export of a round time breakdown, in legend order
pub fn save_breakdown_to_csv(
    entries: &[BreakdownEntry],
    output_prefix: &str,
) -> Result<String, Box<dyn Error>> {
    let filename = format!("{}_breakdown.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["label", "raw_ms", "percentage"])?;
    for entry in entries {
        writer.write_record(&[
            entry.label.clone(),
            entry.raw_value.to_string(),
            entry.percentage.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(filename)
}

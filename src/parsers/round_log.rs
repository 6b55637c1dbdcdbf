use crate::models::{ExtractionReport, Sample};
use crate::utils::constants::ROUND_TIME_LABEL;
use crate::utils::read_log_text;
use lazy_static::lazy_static;
use regex::Regex;
use std::io;
use std::path::Path;

lazy_static! {
    static ref ROUND_TIME_RE: Regex =
        Regex::new(r"^\s*ROUND TIME ELAPSED \(ms\):\s*(?P<latency>\d+(?:\.\d+)?)\s*$").unwrap();
    static ref ORIGIN_RE: Regex = Regex::new(r"(?P<origin>\d+)\s*$").unwrap();
}

/// 로그 라인 분류 결과
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// `ROUND TIME ELAPSED (ms): <n>` 라인
    RoundTime(f64),
    /// 라벨은 있지만 값을 읽을 수 없는 라인
    MalformedRoundTime,
    /// 그 외 라인 (origin 후보)
    Other,
}

pub fn classify_line(line: &str) -> LineKind {
    if !line.trim_start().starts_with(ROUND_TIME_LABEL) {
        return LineKind::Other;
    }
    match ROUND_TIME_RE
        .captures(line)
        .and_then(|caps| caps["latency"].parse::<f64>().ok())
    {
        Some(latency) => LineKind::RoundTime(latency),
        None => LineKind::MalformedRoundTime,
    }
}

/// Trailing integer of an origin line, e.g. `3` or `... now: 3`.
///
/// Ids too large for `u64` saturate to `u64::MAX`; they are still non-zero
/// and therefore client origins.
pub fn parse_origin_id(line: &str) -> Option<u64> {
    ORIGIN_RE.captures(line).map(|caps| {
        let digits = &caps["origin"];
        digits
            .parse()
            .unwrap_or(if digits.bytes().all(|b| b == b'0') { 0 } else { u64::MAX })
    })
}

/// Scans a trial log for two-line round records and keeps the client ones.
///
/// A record is an origin line ending in an integer immediately followed by a
/// round timing line. Records from origin `0` are administrative and dropped.
/// A timing line is never used as the origin of the next record.
pub fn extract_with_report(raw_log: &str) -> (Vec<Sample>, ExtractionReport) {
    let mut samples = Vec::new();
    let mut report = ExtractionReport::default();
    let mut origin_candidate: Option<&str> = None;

    for line in raw_log.lines() {
        match classify_line(line) {
            LineKind::RoundTime(latency_ms) => {
                match origin_candidate.and_then(parse_origin_id) {
                    Some(origin_id) => {
                        let sample = Sample::new(origin_id, latency_ms);
                        if sample.is_client() {
                            report.client_records += 1;
                            samples.push(sample);
                        } else {
                            report.admin_records += 1;
                        }
                    }
                    None => report.malformed_records += 1,
                }
                origin_candidate = None;
            }
            LineKind::MalformedRoundTime => {
                report.malformed_records += 1;
                origin_candidate = None;
            }
            LineKind::Other => origin_candidate = Some(line),
        }
    }

    (samples, report)
}

/// Client samples of one trial log, in log order. No records is not an error.
pub fn extract(raw_log: &str) -> Vec<Sample> {
    extract_with_report(raw_log).0
}

/// Reads one log file, extracts it and releases the text before returning.
pub fn extract_file(path: &Path) -> io::Result<(Vec<Sample>, ExtractionReport)> {
    let text = read_log_text(path)?;
    Ok(extract_with_report(&text))
}

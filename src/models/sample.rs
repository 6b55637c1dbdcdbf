use serde::{Deserialize, Serialize};

/// Origin id written by administrative (non-client) instrumentation.
pub const ADMIN_ORIGIN_ID: u64 = 0;

/// One measured round-trip latency taken from a trial log.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub origin_id: u64,
    pub latency_ms: f64,
}

impl Sample {
    pub fn new(origin_id: u64, latency_ms: f64) -> Self {
        Self {
            origin_id,
            latency_ms,
        }
    }

    pub fn is_client(&self) -> bool {
        self.origin_id != ADMIN_ORIGIN_ID
    }
}

/// Per-log counters collected while scanning, used for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub client_records: usize,
    pub admin_records: usize,
    pub malformed_records: usize,
}

impl ExtractionReport {
    pub fn total_records(&self) -> usize {
        self.client_records + self.admin_records
    }

    pub fn merge(&mut self, other: &ExtractionReport) {
        self.client_records += other.client_records;
        self.admin_records += other.admin_records;
        self.malformed_records += other.malformed_records;
    }
}

// Round record timing line, e.g. "ROUND TIME ELAPSED (ms): 1234"
pub const ROUND_TIME_LABEL: &str = "ROUND TIME ELAPSED (ms):";

// Percentile reported next to the mean
pub const TAIL_PERCENTILE: f64 = 99.0;

// 파일 읽기 버퍼 크기 (1MB)
pub const READ_BUFFER_SIZE: usize = 1 << 20;

pub mod round_log;

pub use round_log::{extract, extract_file, extract_with_report};

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::Once;
use std::sync::OnceLock;

// 전역 로그 파일 핸들
static LOG_FILE: OnceLock<Mutex<Option<File>>> = OnceLock::new();
static INIT: Once = Once::new();

/// Console logger that mirrors every line into `<prefix>_result.log`.
pub struct Logger;

/// 출력 접두사로부터 로그 파일 경로를 결정
///
/// 디렉토리면 `<dir>/result.log`, 아니면 `<prefix>_result.log`.
pub fn log_path_for(output_prefix: &str) -> PathBuf {
    let trimmed = output_prefix.trim_end_matches('/');
    let path = Path::new(trimmed);

    if path.is_dir() || output_prefix.ends_with('/') {
        return path.join("result.log");
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("roundtrace");
    dir.join(format!("{file_name}_result.log"))
}

impl Logger {
    /// Opens the log file once per process. Failing to open it only disables
    /// file logging; console output keeps working.
    pub fn init(output_prefix: &str) {
        INIT.call_once(|| {
            let log_path = log_path_for(output_prefix);

            if let Some(dir) = log_path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    if let Err(e) = fs::create_dir_all(dir) {
                        eprintln!("Cannot create log directory {}: {e}", dir.display());
                        LOG_FILE.get_or_init(|| Mutex::new(None));
                        return;
                    }
                }
            }

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&log_path);

            match file {
                Ok(file) => {
                    println!("Writing log to '{}'", log_path.display());
                    LOG_FILE.get_or_init(|| Mutex::new(Some(file)));
                }
                Err(e) => {
                    eprintln!("Cannot open log file {}: {e}", log_path.display());
                    LOG_FILE.get_or_init(|| Mutex::new(None));
                }
            }
        });
    }

    // 파일 로깅이 켜져 있을 때만 기록
    fn append(line: &str) {
        if let Some(logger) = LOG_FILE.get() {
            if let Ok(mut guard) = logger.lock() {
                if let Some(file) = guard.as_mut() {
                    if let Err(e) = writeln!(file, "{line}") {
                        eprintln!("Failed to write log file: {e}");
                    }
                }
            }
        }
    }

    pub fn log(message: &str) {
        println!("{message}");
        Self::append(message);
    }

    pub fn log_warn(message: &str) {
        eprintln!("WARN: {message}");
        Self::append(&format!("WARN: {message}"));
    }

    pub fn log_error(message: &str) {
        eprintln!("ERROR: {message}");
        Self::append(&format!("ERROR: {message}"));
    }

    pub fn flush() -> std::io::Result<()> {
        if let Some(logger) = LOG_FILE.get() {
            if let Ok(mut guard) = logger.lock() {
                if let Some(file) = guard.as_mut() {
                    file.flush()?;
                }
            }
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log(&message);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log_warn(&message);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log_error(&message);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_for_prefix() {
        let path = log_path_for("out/scaling");
        assert_eq!(path, PathBuf::from("out/scaling_result.log"));
    }

    #[test]
    fn test_log_path_for_directory() {
        let dir = std::env::temp_dir();
        let path = log_path_for(dir.to_str().unwrap());
        assert_eq!(path, dir.join("result.log"));

        let path = log_path_for("reports/");
        assert_eq!(path, PathBuf::from("reports/result.log"));
    }
}

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use xz2::read::XzDecoder;

use super::constants::READ_BUFFER_SIZE;

/// 트라이얼 로그 압축 형식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompressionFormat {
    Gzip,
    Xz,
    None,
}

impl CompressionFormat {
    /// 파일 확장자로 압축 형식 감지
    pub fn from_path(path: &Path) -> Self {
        let path_str = path.to_string_lossy().to_lowercase();

        if path_str.ends_with(".gz") {
            CompressionFormat::Gzip
        } else if path_str.ends_with(".xz") {
            CompressionFormat::Xz
        } else {
            CompressionFormat::None
        }
    }
}

/// Opens a trial log, transparently decompressing `.gz` and `.xz` files.
pub fn open_log_reader(path: &Path) -> io::Result<Box<dyn Read>> {
    let file = BufReader::with_capacity(READ_BUFFER_SIZE, File::open(path)?);

    let reader: Box<dyn Read> = match CompressionFormat::from_path(path) {
        CompressionFormat::Gzip => Box::new(GzDecoder::new(file)),
        CompressionFormat::Xz => Box::new(XzDecoder::new(file)),
        CompressionFormat::None => Box::new(file),
    };
    Ok(reader)
}

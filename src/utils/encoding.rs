use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::io::{self, Read};
use std::path::Path;

use super::compression::open_log_reader;

/// Detect text encoding from a byte slice.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode bytes to UTF-8. Valid UTF-8 is taken as is; anything else goes
/// through encoding detection.
pub fn decode_bytes_auto(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            let (cow, _, _) = detect_encoding(&bytes).decode(&bytes);
            cow.into_owned()
        }
    }
}

/// Read a whole stream into a UTF-8 `String`, honouring a BOM when present.
pub fn read_to_string_auto<R: Read>(reader: R) -> io::Result<String> {
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(None)
        .bom_sniffing(true)
        .strip_bom(true)
        .build(reader);
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    Ok(decode_bytes_auto(bytes))
}

/// Read one trial log (plain, `.gz` or `.xz`) into memory as UTF-8 text.
pub fn read_log_text(path: &Path) -> io::Result<String> {
    read_to_string_auto(open_log_reader(path)?)
}

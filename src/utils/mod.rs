pub mod compression;
pub mod constants;
pub mod encoding;
pub mod logger;

pub use self::encoding::read_log_text;
pub use self::logger::Logger;

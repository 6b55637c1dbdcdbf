mod manifest;
mod phases;

pub use manifest::{CellInputs, CellSource, GridManifest};
pub use phases::{PhaseFile, PhaseSource};

use crate::error::RunError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

// JSON 설정 파일을 읽어 역직렬화
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RunError> {
    let text = fs::read_to_string(path).map_err(|e| RunError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| RunError::Json {
        path: path.to_path_buf(),
        source,
    })
}

use super::read_json;
use crate::error::RunError;
use crate::models::{GridCell, GridShape, LoadParameter};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Trial logs recorded for one grid cell.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CellSource {
    pub load_parameter: LoadParameter,
    pub concurrency_level: u32,
    /// Paths or glob patterns, relative to the manifest's directory.
    pub logs: Vec<String>,
}

impl CellSource {
    pub fn cell(&self) -> GridCell {
        GridCell::new(self.load_parameter, self.concurrency_level)
    }
}

/// Maps physical trial logs to grid coordinates.
///
/// ```json
/// {
///   "title": "Round latency vs users",
///   "grid": { "load_parameters": [100, 200], "concurrency_levels": [10, 50] },
///   "cells": [
///     { "load_parameter": 100, "concurrency_level": 10, "logs": ["mu100/c10-*.log"] }
///   ]
/// }
/// ```
///
/// A `grid` makes series assembly strict; without it assembly is best-effort.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GridManifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub grid: Option<GridShape>,
    pub cells: Vec<CellSource>,
}

/// Resolved log files of one cell, merged across manifest entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInputs {
    pub cell: GridCell,
    pub paths: Vec<PathBuf>,
}

fn validate_load(load: LoadParameter) -> Result<(), RunError> {
    if !load.value().is_finite() || load.value() <= 0.0 {
        return Err(RunError::InvalidLoadParameter(load.value()));
    }
    Ok(())
}

fn validate_level(level: u32) -> Result<(), RunError> {
    if level == 0 {
        return Err(RunError::InvalidConcurrencyLevel(level));
    }
    Ok(())
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

impl GridManifest {
    pub fn load(path: &Path) -> Result<Self, RunError> {
        let manifest: GridManifest = read_json(path)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), RunError> {
        if let Some(grid) = &self.grid {
            for &load in &grid.load_parameters {
                validate_load(load)?;
            }
            for &level in &grid.concurrency_levels {
                validate_level(level)?;
            }
        }
        for source in &self.cells {
            validate_load(source.load_parameter)?;
            validate_level(source.concurrency_level)?;
            if source.logs.is_empty() {
                return Err(RunError::EmptyCell(source.cell()));
            }
        }
        Ok(())
    }

    /// Expands every cell's log list into concrete files.
    ///
    /// Entries naming the same cell are merged in manifest order. Glob
    /// matches are sorted so repeated runs read files in the same order.
    pub fn resolve(&self, base_dir: &Path) -> Result<Vec<CellInputs>, RunError> {
        let mut resolved: Vec<CellInputs> = Vec::new();
        let mut index: HashMap<GridCell, usize> = HashMap::new();

        for source in &self.cells {
            let mut paths = Vec::new();
            for pattern in &source.logs {
                paths.extend(resolve_pattern(base_dir, pattern)?);
            }

            let cell = source.cell();
            match index.get(&cell) {
                Some(&i) => resolved[i].paths.extend(paths),
                None => {
                    index.insert(cell, resolved.len());
                    resolved.push(CellInputs { cell, paths });
                }
            }
        }

        Ok(resolved)
    }
}

fn resolve_pattern(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, RunError> {
    let full = if Path::new(pattern).is_absolute() {
        PathBuf::from(pattern)
    } else {
        base_dir.join(pattern)
    };

    if !is_glob_pattern(pattern) {
        return Ok(vec![full]);
    }

    let full_pattern = full.to_string_lossy().into_owned();
    let entries = glob::glob(&full_pattern).map_err(|source| RunError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(RunError::io(path, e.into()));
            }
        }
    }

    if paths.is_empty() {
        return Err(RunError::NoMatch(pattern.to_string()));
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(json: &str) -> GridManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_manifest_parsing() {
        let manifest = parse(
            r#"{
                "title": "scaling",
                "grid": { "load_parameters": [100, 200], "concurrency_levels": [10, 50] },
                "cells": [
                    { "load_parameter": 100, "concurrency_level": 10, "logs": ["a.log"] }
                ]
            }"#,
        );
        assert_eq!(manifest.title.as_deref(), Some("scaling"));
        let grid = manifest.grid.as_ref().unwrap();
        assert_eq!(grid.cells().len(), 4);
        assert_eq!(manifest.cells[0].cell(), GridCell::new(100.0, 10));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_grid_is_optional() {
        let manifest = parse(r#"{ "cells": [] }"#);
        assert!(manifest.grid.is_none());
        assert!(manifest.title.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let manifest = parse(
            r#"{ "cells": [ { "load_parameter": -5, "concurrency_level": 10, "logs": ["a"] } ] }"#,
        );
        assert!(matches!(
            manifest.validate(),
            Err(RunError::InvalidLoadParameter(v)) if v == -5.0
        ));

        let manifest = parse(
            r#"{ "cells": [ { "load_parameter": 100, "concurrency_level": 0, "logs": ["a"] } ] }"#,
        );
        assert!(matches!(
            manifest.validate(),
            Err(RunError::InvalidConcurrencyLevel(0))
        ));

        let manifest = parse(
            r#"{ "cells": [ { "load_parameter": 100, "concurrency_level": 10, "logs": [] } ] }"#,
        );
        assert!(matches!(manifest.validate(), Err(RunError::EmptyCell(_))));
    }

    #[test]
    fn test_resolve_merges_cells_and_expands_globs() {
        let dir = std::env::temp_dir().join("roundtrace_manifest_resolve");
        fs::create_dir_all(dir.join("mu100")).unwrap();
        for name in ["c10-b.log", "c10-a.log", "c50.log"] {
            fs::write(dir.join("mu100").join(name), "").unwrap();
        }

        let manifest = parse(
            r#"{ "cells": [
                { "load_parameter": 100, "concurrency_level": 10, "logs": ["mu100/c10-*.log"] },
                { "load_parameter": 100, "concurrency_level": 50, "logs": ["mu100/c50.log"] },
                { "load_parameter": 100, "concurrency_level": 10, "logs": ["mu100/c50.log"] }
            ] }"#,
        );
        let inputs = manifest.resolve(&dir).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].cell, GridCell::new(100.0, 10));
        assert_eq!(
            inputs[0].paths,
            vec![
                dir.join("mu100/c10-a.log"),
                dir.join("mu100/c10-b.log"),
                dir.join("mu100/c50.log"),
            ]
        );
        assert_eq!(inputs[1].paths, vec![dir.join("mu100/c50.log")]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unmatched_glob_is_an_error() {
        let manifest = parse(
            r#"{ "cells": [ { "load_parameter": 100, "concurrency_level": 10, "logs": ["nothing-here-*.log"] } ] }"#,
        );
        let dir = std::env::temp_dir().join("roundtrace_manifest_nomatch");
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            manifest.resolve(&dir),
            Err(RunError::NoMatch(p)) if p == "nothing-here-*.log"
        ));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("roundtrace_manifest_load.json");
        fs::write(
            &path,
            r#"{ "cells": [ { "load_parameter": 200, "concurrency_level": 150, "logs": ["x.log"] } ] }"#,
        )
        .unwrap();
        let manifest = GridManifest::load(&path).unwrap();
        assert_eq!(manifest.cells[0].cell(), GridCell::new(200.0, 150));
        fs::remove_file(&path).ok();

        assert!(matches!(
            GridManifest::load(Path::new("/definitely/not/here.json")),
            Err(RunError::Io { .. })
        ));
    }
}

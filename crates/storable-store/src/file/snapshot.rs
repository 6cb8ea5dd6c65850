//! On-disk snapshot of a durable store
//!
//! `{"version":1,"entries":[["key","value"],...]}`; entries are kept in
//! positional order.

use crate::errors::{corrupt_snapshot, io_error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use storable_core::errors::StorageError;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Snapshot {
    version: u32,
    entries: Vec<(String, String)>,
}

/// Read the entries stored at `path`
///
/// A missing file is an empty store.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error("read_snapshot", e)),
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| corrupt_snapshot(path, e.to_string()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(corrupt_snapshot(
            path,
            format!("unsupported snapshot version {}", snapshot.version),
        ));
    }

    Ok(snapshot.entries)
}

/// Render entries as snapshot bytes
pub fn encode(entries: &[(String, String)]) -> Result<Vec<u8>> {
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        entries,
    };
    serde_json::to_vec(&snapshot).map_err(|e| StorageError::Io {
        op: "encode_snapshot".to_string(),
        reason: e.to_string(),
    })
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    entries: &'a [(String, String)],
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let entries = load(&temp_dir.path().join("absent.json")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&[("k".to_string(), "\"v\"".to_string())]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"version":1,"entries":[["k","\"v\""]]}"#
        );
    }

    #[test]
    fn test_unknown_version_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local.json");
        fs::write(&path, r#"{"version":7,"entries":[]}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version 7"));
    }
}

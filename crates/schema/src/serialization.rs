//! JSON snapshot loading and saving
//!
//! The real transport format belongs to the API layer; these helpers only
//! read and write the store's own serde representation so snapshots can be
//! replayed from disk by tooling and tests.

use crate::document::{DataSnapshot, EditingDocument};
use ctb_core::{BuilderError, BuilderResult};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

// ============================================================================
// Generic Helpers
// ============================================================================

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> BuilderResult<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| BuilderError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value = serde_json::from_str(&content)?;
    tracing::debug!("Read {} bytes of JSON from {}", content.len(), path.display());
    Ok(value)
}

/// Serialize a value to a pretty-printed JSON file
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> BuilderResult<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value)?;

    std::fs::write(path, content).map_err(|e| BuilderError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!("Wrote JSON to {}", path.display());
    Ok(())
}

// ============================================================================
// Snapshots
// ============================================================================

/// Load a data snapshot from a file
pub fn load_snapshot(path: impl AsRef<Path>) -> BuilderResult<DataSnapshot> {
    read_json(path)
}

/// Load a data snapshot from a JSON string
pub fn load_snapshot_from_str(json: &str) -> BuilderResult<DataSnapshot> {
    Ok(serde_json::from_str(json)?)
}

/// Save a data snapshot to a file
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &DataSnapshot) -> BuilderResult<()> {
    write_json(path, snapshot)
}

/// Load an editing document from a file
pub fn load_document(path: impl AsRef<Path>) -> BuilderResult<EditingDocument> {
    read_json(path)
}

// ============================================================================
// Tests
// ============================================================================

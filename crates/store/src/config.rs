//! Store configuration

use ctb_core::{BuilderError, BuilderResult, ResultExt, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Settings for a [`Store`](crate::Store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Maximum number of undo steps; 0 disables history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Load from a JSON file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> BuilderResult<Self> {
        let path = path.as_ref();
        let config = ctb_schema::read_json::<Self>(path)
            .with_context(format!("Store config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Override the history limit
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Validatable for StoreConfig {
    fn validate(&self) -> BuilderResult<()> {
        // Every snapshot is a full state clone.
        if self.history_limit > 10_000 {
            return Err(BuilderError::validation(format!(
                "History limit {} exceeds 10000",
                self.history_limit
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        assert_eq!(StoreConfig::default().history_limit, 50);
        assert!(StoreConfig::default().is_valid());
    }

    #[test]
    fn test_from_file_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(StoreConfig::from_file(&path).unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_from_file_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{ "historyLimit": 5 }"#).unwrap();

        assert_eq!(StoreConfig::from_file(&path).unwrap().history_limit, 5);
    }

    #[test]
    fn test_from_file_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "historyLimit = 5").unwrap();

        let err = StoreConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, BuilderError::WithContext { .. }));
    }

    #[test]
    fn test_from_file_rejects_huge_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{ "historyLimit": 1000000 }"#).unwrap();

        assert!(StoreConfig::from_file(&path).unwrap_err().is_validation());
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User preferences, currently just the onboarding flag.
///
/// Read once at startup, written once when the welcome tour is dismissed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub onboarded: bool,
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read preferences file '{0}': {1}")]
    Read(PathBuf, std::io::Error),
    #[error("failed to write preferences file '{0}': {1}")]
    Write(PathBuf, std::io::Error),
    #[error("failed to parse preferences file '{0}': {1}")]
    Parse(PathBuf, serde_yaml::Error),
}

impl Preferences {
    /// Loads preferences from disk. A missing file is not an error; it just
    /// means the user has never been onboarded.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PrefsError::Read(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| PrefsError::Parse(path.to_path_buf(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PrefsError::Write(path.to_path_buf(), e))?;
        }
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PrefsError::Parse(path.to_path_buf(), e))?;
        std::fs::write(path, contents).map_err(|e| PrefsError::Write(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_means_not_onboarded() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prefs.yaml");

        let prefs = Preferences::load(&path).unwrap();
        assert!(!prefs.onboarded);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("prefs.yaml");

        let prefs = Preferences { onboarded: true };
        prefs.save(&path).unwrap();

        let loaded = Preferences::load(&path).unwrap();
        assert!(loaded.onboarded);
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prefs.yaml");
        std::fs::write(&path, "onboarded: [not a bool").unwrap();

        assert!(Preferences::load(&path).is_err());
    }
}

//! Persisted language preference.
//!
//! The winning detection result is written back after every resolution, so
//! a returning visitor gets a stable language without re-running inference.
//! The record lives in a small JSON file under an application-owned path.

use crate::language::Language;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A persisted language choice with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreference {
    /// Tag of the chosen language
    pub language: String,

    /// Label of the signal that chose it (e.g., "url", "manual", "default")
    pub method: String,

    /// When the choice was recorded (ISO-8601 in the file)
    pub timestamp: DateTime<Utc>,
}

impl StoredPreference {
    /// Create a record for `language` chosen via `method`, stamped now.
    pub fn new(language: Language, method: &str) -> Self {
        Self {
            language: language.tag().to_string(),
            method: method.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the record is younger than `window` as of `now`.
    pub fn is_fresh(&self, window: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp) <= window
    }
}

/// File-backed store for the persisted preference.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preference, if any.
    ///
    /// A missing file is `Ok(None)`; an unreadable or unparseable file is an
    /// error for the caller to degrade on.
    pub fn load(&self) -> Result<Option<StoredPreference>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preference file {}", self.path.display()))?;
        let preference: StoredPreference = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse preference file {}", self.path.display()))?;

        Ok(Some(preference))
    }

    /// Write the preference, replacing any previous record.
    pub fn save(&self, preference: &StoredPreference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create preference directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(preference)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preference file {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join("language.json"))
    }

    // ==================== Round-trip Tests ====================

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let preference = StoredPreference::new(Language::SPANISH_MX, "url");
        store.save(&preference).expect("save");

        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded, preference);
        assert_eq!(loaded.language, "es-MX");
        assert_eq!(loaded.method, "url");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        fs::write(store.path(), "not json").expect("write");

        let result = store.load();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().expect("temp dir");
        let store = PreferenceStore::new(dir.path().join("nested/dir/language.json"));

        let preference = StoredPreference::new(Language::ENGLISH, "default");
        store.save(&preference).expect("save");

        assert!(store.path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        store
            .save(&StoredPreference::new(Language::ENGLISH, "default"))
            .expect("save");
        store
            .save(&StoredPreference::new(Language::SPANISH_MX, "manual"))
            .expect("save");

        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded.language, "es-MX");
        assert_eq!(loaded.method, "manual");
    }

    // ==================== Timestamp Format Tests ====================

    #[test]
    fn test_timestamp_serializes_as_iso8601() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        store
            .save(&StoredPreference::new(Language::ENGLISH, "browser"))
            .expect("save");

        let raw = fs::read_to_string(store.path()).expect("read");
        // RFC 3339 timestamp with a date separator and a T divider
        assert!(raw.contains("\"timestamp\""));
        assert!(raw.contains('T'));
        assert!(raw.contains('-'));
    }

    // ==================== Freshness Tests ====================

    #[test]
    fn test_is_fresh_within_window() {
        let now = Utc::now();
        let preference = StoredPreference {
            language: "en".to_string(),
            method: "manual".to_string(),
            timestamp: now - Duration::days(10),
        };

        assert!(preference.is_fresh(Duration::days(30), now));
    }

    #[test]
    fn test_is_fresh_outside_window() {
        let now = Utc::now();
        let preference = StoredPreference {
            language: "en".to_string(),
            method: "manual".to_string(),
            timestamp: now - Duration::days(31),
        };

        assert!(!preference.is_fresh(Duration::days(30), now));
    }

    #[test]
    fn test_is_fresh_at_boundary() {
        let now = Utc::now();
        let preference = StoredPreference {
            language: "en".to_string(),
            method: "manual".to_string(),
            timestamp: now - Duration::days(30),
        };

        // Exactly the window age still counts as fresh
        assert!(preference.is_fresh(Duration::days(30), now));
    }
}

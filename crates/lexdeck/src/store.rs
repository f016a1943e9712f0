//! Durable session persistence.
//!
//! The session snapshot is a small JSON document in the user data
//! directory. Persistence is best-effort resume, not transactional: a
//! failed write is logged and ignored, and a missing or malformed file
//! falls back to defaults field by field.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FILENAME: &str = "session.json";
const APP_DIR: &str = "lexdeck";

fn default_dark_mode() -> bool {
    true
}

/// Everything that survives a restart. Mode deliberately does not: a new
/// session always opens in Student mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub slide_index: usize,

    #[serde(default)]
    pub score: u32,

    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,

    /// Slide id -> chosen option id. Write-once per slide.
    #[serde(default)]
    pub answers: BTreeMap<u32, String>,

    /// Slide id -> whether correctness has been revealed.
    #[serde(default)]
    pub revealed: BTreeMap<u32, bool>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            slide_index: 0,
            score: 0,
            dark_mode: default_dark_mode(),
            answers: BTreeMap::new(),
            revealed: BTreeMap::new(),
        }
    }
}

/// Handle to the snapshot file. A store without a path (tests, or an
/// environment with no data dir) silently drops writes.
#[derive(Debug, Clone)]
pub struct Store {
    path: Option<PathBuf>,
}

impl Store {
    pub fn at_default_location() -> Self {
        let path = dirs::data_dir().map(|d| d.join(APP_DIR).join(FILENAME));
        if path.is_none() {
            log::warn!("no data directory available; session will not persist");
        }
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// A store that never touches the filesystem.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Load the snapshot, falling back to defaults on any problem.
    pub fn load(&self) -> Snapshot {
        let Some(path) = &self.path else {
            return Snapshot::default();
        };
        match Self::read_snapshot(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if path.exists() {
                    log::warn!("could not restore session from {}: {e}", path.display());
                }
                Snapshot::default()
            }
        }
    }

    fn read_snapshot(path: &Path) -> Result<Snapshot> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the snapshot. Best-effort: failures are logged, never fatal.
    pub fn save(&self, snapshot: &Snapshot) {
        let Some(path) = &self.path else { return };
        if let Err(e) = Self::write_snapshot(path, snapshot) {
            log::warn!("could not persist session to {}: {e}", path.display());
        }
    }

    fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Remove the persisted snapshot entirely.
    pub fn clear(&self) -> Result<()> {
        if let Some(path) = &self.path
            && path.exists()
        {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> Store {
        let path = std::env::temp_dir()
            .join("lexdeck-store-tests")
            .join(format!("{name}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        Store::at(path)
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let store = temp_store("missing");
        assert_eq!(store.load(), Snapshot::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        let mut snapshot = Snapshot::default();
        snapshot.slide_index = 5;
        snapshot.score = 20;
        snapshot.dark_mode = false;
        snapshot.answers.insert(101, "B".to_string());
        snapshot.revealed.insert(101, true);

        store.save(&snapshot);
        assert_eq!(store.load(), snapshot);
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let store = temp_store("malformed");
        std::fs::create_dir_all(store.path().unwrap().parent().unwrap()).unwrap();
        std::fs::write(store.path().unwrap(), "{not json").unwrap();
        assert_eq!(store.load(), Snapshot::default());
        store.clear().unwrap();
    }

    #[test]
    fn test_missing_fields_fall_back_individually() {
        let store = temp_store("partial");
        std::fs::create_dir_all(store.path().unwrap().parent().unwrap()).unwrap();
        std::fs::write(store.path().unwrap(), r#"{"slide_index": 3}"#).unwrap();
        let snapshot = store.load();
        assert_eq!(snapshot.slide_index, 3);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.dark_mode);
        store.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_file() {
        let store = temp_store("clear");
        store.save(&Snapshot::default());
        assert!(store.path().unwrap().exists());
        store.clear().unwrap();
        assert!(!store.path().unwrap().exists());
    }

    #[test]
    fn test_disabled_store_is_inert() {
        let store = Store::disabled();
        store.save(&Snapshot::default());
        assert_eq!(store.load(), Snapshot::default());
        store.clear().unwrap();
    }
}

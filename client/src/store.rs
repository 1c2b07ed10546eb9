//! Persistence of saved locations
//!
//! The whole list is written on every change. A missing file is an empty
//! list, not an error.

use shared::SavedLocation;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// File name of the persisted location list
pub const STORE_FILE_NAME: &str = "ndviLocations.json";

/// Storage boundary for the saved-location list
pub trait LocationStore: Send + Sync {
    fn load(&self) -> ClientResult<Vec<SavedLocation>>;
    fn save(&self, locations: &[SavedLocation]) -> ClientResult<()>;
}

/// JSON file under the configured data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationStore for JsonFileStore {
    fn load(&self) -> ClientResult<Vec<SavedLocation>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text).map_err(|e| {
            ClientError::Storage(format!("Corrupt {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, locations: &[SavedLocation]) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(locations)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, json)?;

        tracing::debug!("Saved {} locations to {}", locations.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    locations: Mutex<Vec<SavedLocation>>,
}

impl LocationStore for MemoryStore {
    fn load(&self) -> ClientResult<Vec<SavedLocation>> {
        self.locations
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| ClientError::Storage("Memory store poisoned".to_string()))
    }

    fn save(&self, locations: &[SavedLocation]) -> ClientResult<()> {
        let mut guard = self
            .locations
            .lock()
            .map_err(|_| ClientError::Storage("Memory store poisoned".to_string()))?;
        *guard = locations.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Coordinate, MonthlySeries};

    fn kyiv() -> SavedLocation {
        SavedLocation::new(
            "Kyiv",
            Coordinate::new(50.45, 30.52).unwrap(),
            MonthlySeries::new([0.5; 10]),
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        store.save(&[kyiv()]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["name"], "Kyiv");
        assert_eq!(value[0]["ndvi"].as_array().unwrap().len(), 10);

        assert_eq!(store.load().unwrap(), vec![kyiv()]);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(ClientError::Storage(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        store.save(&[kyiv()]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}

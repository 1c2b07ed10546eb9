//! Saved-location state container
//!
//! Every mutation is persisted through the [`LocationStore`] before it
//! becomes visible. A failed save leaves the in-memory list unchanged.

use shared::SavedLocation;

use crate::error::{ClientError, ClientResult};
use crate::store::LocationStore;

/// Ordered list of saved locations plus its persistence
pub struct LocationBook {
    locations: Vec<SavedLocation>,
    store: Box<dyn LocationStore>,
}

impl LocationBook {
    /// Load the persisted list
    pub fn load(store: impl LocationStore + 'static) -> ClientResult<Self> {
        let locations = store.load()?;
        tracing::debug!("Loaded {} saved locations", locations.len());
        Ok(Self {
            locations,
            store: Box::new(store),
        })
    }

    pub fn locations(&self) -> &[SavedLocation] {
        &self.locations
    }

    pub fn get(&self, index: usize) -> Option<&SavedLocation> {
        self.locations.get(index)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Append a location. Returns `false` when the same name and
    /// coordinates are already saved.
    pub fn add(&mut self, location: SavedLocation) -> ClientResult<bool> {
        if self.locations.iter().any(|saved| saved.same_place(&location)) {
            return Ok(false);
        }

        self.locations.push(location);
        if let Err(err) = self.store.save(&self.locations) {
            self.locations.pop();
            return Err(err);
        }
        Ok(true)
    }

    /// Remove the location at `index`
    pub fn remove(&mut self, index: usize) -> ClientResult<SavedLocation> {
        if index >= self.locations.len() {
            return Err(ClientError::InvalidInput(format!(
                "No saved location at index {}",
                index
            )));
        }

        let removed = self.locations.remove(index);
        if let Err(err) = self.store.save(&self.locations) {
            self.locations.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }
}

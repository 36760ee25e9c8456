//! In-process itinerary store for tests and development.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::model::{Itinerary, ItineraryDocument};
use crate::traits::ItineraryStore;

/// `HashMap`-backed store keyed by (user, trip).
///
/// Check-then-set runs under a single lock, so the conditional backup
/// write is atomic here, unlike remote adapters.
#[derive(Debug, Default)]
pub struct MemoryItineraryStore {
    docs: Mutex<HashMap<(String, String), ItineraryDocument>>,
}

impl MemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn doc_key(user_id: &str, trip_id: &str) -> (String, String) {
    (user_id.to_string(), trip_id.to_string())
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("store mutex poisoned".to_string())
}

impl ItineraryStore for MemoryItineraryStore {
    fn get(&self, user_id: &str, trip_id: &str) -> Result<Option<ItineraryDocument>, StoreError> {
        let docs = self.docs.lock().map_err(|_| poisoned())?;
        Ok(docs.get(&doc_key(user_id, trip_id)).cloned())
    }

    fn put(&self, user_id: &str, trip_id: &str, doc: &ItineraryDocument) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| poisoned())?;
        docs.insert(doc_key(user_id, trip_id), doc.clone());
        Ok(())
    }

    fn update_itinerary(
        &self,
        user_id: &str,
        trip_id: &str,
        itinerary: &Itinerary,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| poisoned())?;
        let doc = docs
            .get_mut(&doc_key(user_id, trip_id))
            .ok_or_else(|| StoreError::MissingDocument {
                trip_id: trip_id.to_string(),
            })?;
        doc.itinerary = itinerary.clone();
        Ok(())
    }

    fn set_backup_if_absent(
        &self,
        user_id: &str,
        trip_id: &str,
        original: &Itinerary,
    ) -> Result<bool, StoreError> {
        let mut docs = self.docs.lock().map_err(|_| poisoned())?;
        let Some(doc) = docs.get_mut(&doc_key(user_id, trip_id)) else {
            return Ok(false);
        };
        if doc.itinerary_original_backup.is_some() {
            return Ok(false);
        }
        doc.itinerary_original_backup = Some(original.clone());
        Ok(true)
    }
}

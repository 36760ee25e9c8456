//! HTTP/JSON document-store adapter.
//!
//! Speaks a plain REST layout: `GET`/`PUT`/`PATCH` on
//! `{base}/users/{user}/itineraries/{trip}`. `PATCH` merges the given
//! fields into the stored document.

use serde_json::json;
use tracing::warn;

use crate::error::StoreError;
use crate::model::{Itinerary, ItineraryDocument};
use crate::traits::ItineraryStore;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpItineraryStore {
    config: StoreConfig,
    client: reqwest::blocking::Client,
}

impl HttpItineraryStore {
    pub fn new(config: StoreConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn document_url(&self, user_id: &str, trip_id: &str) -> String {
        format!(
            "{}/users/{}/itineraries/{}",
            self.config.base_url, user_id, trip_id
        )
    }
}

impl ItineraryStore for HttpItineraryStore {
    fn get(&self, user_id: &str, trip_id: &str) -> Result<Option<ItineraryDocument>, StoreError> {
        let response = self.client.get(self.document_url(user_id, trip_id)).send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc = response.error_for_status()?.json::<ItineraryDocument>()?;
        Ok(Some(doc))
    }

    fn put(&self, user_id: &str, trip_id: &str, doc: &ItineraryDocument) -> Result<(), StoreError> {
        self.client
            .put(self.document_url(user_id, trip_id))
            .json(doc)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn update_itinerary(
        &self,
        user_id: &str,
        trip_id: &str,
        itinerary: &Itinerary,
    ) -> Result<(), StoreError> {
        self.client
            .patch(self.document_url(user_id, trip_id))
            .json(&json!({ "itinerary": itinerary }))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn set_backup_if_absent(
        &self,
        user_id: &str,
        trip_id: &str,
        original: &Itinerary,
    ) -> Result<bool, StoreError> {
        // Read-then-write: racing writers are last-writer-wins, accepted
        // under the one-optimization-per-trip assumption. A store with a
        // native conditional field write should get its own adapter.
        let Some(doc) = self.get(user_id, trip_id)? else {
            warn!(trip_id, "backup requested for a missing document");
            return Ok(false);
        };
        if doc.itinerary_original_backup.is_some() {
            return Ok(false);
        }
        self.client
            .patch(self.document_url(user_id, trip_id))
            .json(&json!({ "itinerary_original_backup": original }))
            .send()?
            .error_for_status()?;
        Ok(true)
    }
}

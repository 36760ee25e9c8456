//! Core collaborator traits for the itinerary planner.
//!
//! These are intentionally narrow. Persistence technology and content
//! catalogs live behind them; concrete apps supply their own adapters.

use crate::error::{SourceError, StoreError};
use crate::model::{HiddenGem, Itinerary, ItineraryDocument, Poi};

/// A routable stop with a mandatory position.
///
/// Position is total by construction: anything without coordinates must be
/// separated out before routing, so a malformed stop cannot reach the
/// route constructor.
pub trait Stop {
    /// Location coordinates (lat, lng).
    fn position(&self) -> (f64, f64);
}

impl Stop for (f64, f64) {
    fn position(&self) -> (f64, f64) {
        *self
    }
}

/// Read-only catalog of POIs for a region.
pub trait PoiCatalog {
    /// All candidate POIs for a region, unfiltered.
    fn pois_for(&self, region: &str) -> Result<Vec<Poi>, SourceError>;
}

/// Read-only source of user-submitted hidden gems.
///
/// Implementations match by region; tag/interest matching and eligibility
/// checks happen in the assembler.
pub trait HiddenGemSource {
    fn gems_for(&self, region: &str, interests: &[String]) -> Result<Vec<HiddenGem>, SourceError>;
}

/// Read/write store for itinerary documents, keyed by (user, trip).
///
/// Every write is a complete value (document or field), never a delta, so a
/// failed call leaves the last successful write as the durable state.
pub trait ItineraryStore {
    /// Fetch a document. `Ok(None)` when the trip was never saved.
    fn get(&self, user_id: &str, trip_id: &str) -> Result<Option<ItineraryDocument>, StoreError>;

    /// Persist a full document, overwriting any prior version.
    fn put(&self, user_id: &str, trip_id: &str, doc: &ItineraryDocument) -> Result<(), StoreError>;

    /// Overwrite only the live `itinerary` field.
    fn update_itinerary(
        &self,
        user_id: &str,
        trip_id: &str,
        itinerary: &Itinerary,
    ) -> Result<(), StoreError>;

    /// Write the one-time pre-optimization backup, only if absent.
    ///
    /// Returns `true` when this call wrote the backup, `false` when a backup
    /// already existed (or the document is gone). Stores with native
    /// conditional field writes should use them here.
    fn set_backup_if_absent(
        &self,
        user_id: &str,
        trip_id: &str,
        original: &Itinerary,
    ) -> Result<bool, StoreError>;
}

//! Persistence-then-optimize-then-persist orchestration.
//!
//! Every store call writes a complete value, so a failure at any step
//! leaves the last successful write as the durable state.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::model::{ItineraryDocument, ItineraryPayload};
use crate::optimize::{OptimizeOptions, optimize_itinerary};
use crate::traits::ItineraryStore;

/// Persist a raw itinerary payload, optimize it, and persist the result.
///
/// Sequence: write the full document (overwriting any prior version of
/// the trip), read it back, optimize, and, when optimization produced
/// anything, snapshot the pre-optimization ordering into the one-time
/// backup field before overwriting the live itinerary. A trip with no
/// geocoded stops keeps the raw payload as authoritative.
///
/// The backup is write-once per trip: later saves and re-optimizations
/// never refresh it.
pub fn save_and_optimize<S: ItineraryStore>(
    store: &S,
    user_id: &str,
    trip_id: &str,
    payload: ItineraryPayload,
    options: &OptimizeOptions,
) -> Result<ItineraryDocument, PipelineError> {
    // A full save must not clobber the backup captured by an earlier run.
    let prior_backup = store
        .get(user_id, trip_id)?
        .and_then(|doc| doc.itinerary_original_backup);

    let mut doc = ItineraryDocument {
        trip_id: trip_id.to_string(),
        user_id: user_id.to_string(),
        location: payload.location,
        start_date: payload.start_date,
        end_date: payload.end_date,
        created_at: Some(Utc::now().to_rfc3339()),
        poi_count: payload.itinerary.activity_count(),
        itinerary: payload.itinerary,
        itinerary_original_backup: prior_backup,
        extra: payload.extra,
    };
    store.put(user_id, trip_id, &doc)?;
    info!(user_id, trip_id, pois = doc.poi_count, "raw itinerary persisted");

    // Optimize from the just-persisted state, not the in-memory copy.
    let saved = store
        .get(user_id, trip_id)?
        .ok_or_else(|| PipelineError::MissingItinerary {
            trip_id: trip_id.to_string(),
        })?;

    match optimize_itinerary(&saved.itinerary, options) {
        Some(optimized) => {
            store.set_backup_if_absent(user_id, trip_id, &saved.itinerary)?;
            store.update_itinerary(user_id, trip_id, &optimized)?;
            info!(user_id, trip_id, "optimized itinerary persisted");
            if doc.itinerary_original_backup.is_none() {
                doc.itinerary_original_backup = Some(saved.itinerary);
            }
            doc.itinerary = optimized;
            Ok(doc)
        }
        None => {
            warn!(user_id, trip_id, "nothing to optimize; raw itinerary stays authoritative");
            Ok(doc)
        }
    }
}

/// Manually re-optimize the current persisted state.
///
/// Rewrites only the live itinerary field: no payload rewrite, no
/// backup refresh. The conditional backup write still covers a
/// first-ever optimization arriving through this path.
pub fn reoptimize<S: ItineraryStore>(
    store: &S,
    user_id: &str,
    trip_id: &str,
    options: &OptimizeOptions,
) -> Result<ItineraryDocument, PipelineError> {
    let mut doc = store
        .get(user_id, trip_id)?
        .ok_or_else(|| PipelineError::MissingItinerary {
            trip_id: trip_id.to_string(),
        })?;

    match optimize_itinerary(&doc.itinerary, options) {
        Some(optimized) => {
            store.set_backup_if_absent(user_id, trip_id, &doc.itinerary)?;
            store.update_itinerary(user_id, trip_id, &optimized)?;
            info!(user_id, trip_id, "re-optimized itinerary persisted");
            if doc.itinerary_original_backup.is_none() {
                doc.itinerary_original_backup = Some(doc.itinerary.clone());
            }
            doc.itinerary = optimized;
            Ok(doc)
        }
        None => Ok(doc),
    }
}

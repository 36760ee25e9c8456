//! Crate error taxonomy.
//!
//! One enum per failure domain. Validation errors fail fast at the assembler
//! boundary; collaborator failures either degrade locally (gem lookups) or
//! propagate (persistence writes).

use thiserror::Error;

/// Errors raised while assembling an itinerary from a POI pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// A date string was not ISO-8601 (date or datetime).
    #[error("invalid date `{value}`: expected ISO-8601 date or datetime")]
    InvalidDate { value: String },

    /// The end date precedes the start date.
    #[error("invalid range: end date `{end}` precedes start date `{start}`")]
    InvalidRange { start: String, end: String },
}

/// Errors from read-only content sources (POI catalog, hidden gems).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("content source unavailable: {0}")]
    Unavailable(String),

    #[error("content source HTTP failure")]
    Http(#[from] reqwest::Error),

    #[error("content source returned a malformed record")]
    Malformed(#[from] serde_json::Error),
}

/// Errors from the itinerary document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the call.
    #[error("itinerary store unavailable: {0}")]
    Unavailable(String),

    /// A field update targeted a document that does not exist.
    #[error("no stored document for trip `{trip_id}`")]
    MissingDocument { trip_id: String },

    #[error("itinerary store HTTP failure")]
    Http(#[from] reqwest::Error),

    #[error("itinerary store returned a malformed document")]
    Malformed(#[from] serde_json::Error),
}

/// Errors from the save-and-optimize pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Re-optimization was requested for a trip that was never saved.
    #[error("no itinerary stored for trip `{trip_id}`")]
    MissingItinerary { trip_id: String },
}

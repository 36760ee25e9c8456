//! Pipeline orchestration tests
//!
//! Save-then-optimize sequencing, the one-time backup, conservation
//! across optimization, and the no-geocoded-stops fallback.

use trip_planner::error::PipelineError;
use trip_planner::memory_store::MemoryItineraryStore;
use trip_planner::model::{
    Activity, BudgetCategory, Coordinates, Itinerary, ItineraryPayload, TimeOfDay,
};
use trip_planner::optimize::{OptimizeOptions, optimize_itinerary};
use trip_planner::pipeline::{reoptimize, save_and_optimize};
use trip_planner::traits::ItineraryStore;

// ============================================================================
// Test Fixtures
// ============================================================================

fn activity(id: &str, coords: Option<(f64, f64)>) -> Activity {
    Activity {
        id: id.to_string(),
        name: format!("Stop {}", id),
        tags: Vec::new(),
        best_time: TimeOfDay::Anytime,
        budget_category: BudgetCategory::Unknown,
        disclaimer: String::new(),
        photo_url: String::new(),
        coordinates: coords.map(|(lat, lng)| Coordinates::new(lat, lng)),
    }
}

fn payload(days: Vec<Vec<Activity>>) -> ItineraryPayload {
    let mut itinerary = Itinerary::with_day_count(days.len());
    for (i, activities) in days.into_iter().enumerate() {
        itinerary.days[i].activities = activities;
    }
    ItineraryPayload {
        location: "Bengaluru".to_string(),
        start_date: "2025-05-01".to_string(),
        end_date: "2025-05-02".to_string(),
        itinerary,
        extra: serde_json::Map::new(),
    }
}

fn sorted_ids(itinerary: &Itinerary) -> Vec<String> {
    let mut ids: Vec<String> = itinerary
        .activity_ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    ids.sort();
    ids
}

// Scattered Bengaluru stops, deliberately out of geographic order.
fn geocoded_payload() -> ItineraryPayload {
    payload(vec![
        vec![
            activity("palace", Some((12.9987, 77.5920))),
            activity("lalbagh", Some((12.9507, 77.5848))),
        ],
        vec![
            activity("cubbon", Some((12.9763, 77.5929))),
            activity("iskcon", Some((13.0108, 77.5511))),
        ],
    ])
}

// ============================================================================
// Save and optimize
// ============================================================================

#[test]
fn test_save_and_optimize_persists_optimized_itinerary() {
    let store = MemoryItineraryStore::new();
    let raw = geocoded_payload().itinerary;

    let doc = save_and_optimize(
        &store,
        "user-1",
        "trip-1",
        geocoded_payload(),
        &OptimizeOptions::default(),
    )
    .unwrap();

    // The multiset of activities is conserved; the stored document is the
    // returned one.
    assert_eq!(sorted_ids(&doc.itinerary), sorted_ids(&raw));
    assert_eq!(doc.poi_count, 4);

    let stored = store.get("user-1", "trip-1").unwrap().unwrap();
    assert_eq!(stored.itinerary, doc.itinerary);
    assert_eq!(stored.itinerary_original_backup, Some(raw));
    assert_eq!(stored.location, "Bengaluru");
}

#[test]
fn test_optimized_day_order_is_geographically_coherent() {
    // Three stops on one day, inserted out of order: the optimizer must
    // visit the near pair before the far stop.
    let store = MemoryItineraryStore::new();
    let doc = save_and_optimize(
        &store,
        "user-1",
        "trip-1",
        payload(vec![vec![
            activity("3", Some((13.05, 77.65))),
            activity("1", Some((12.97, 77.59))),
            activity("2", Some((12.98, 77.60))),
        ]]),
        &OptimizeOptions::default(),
    )
    .unwrap();

    let order: Vec<&str> = doc.itinerary.activity_ids();
    assert!(
        order == vec!["1", "2", "3"] || order == vec!["3", "2", "1"],
        "incoherent visit order: {:?}",
        order
    );
}

#[test]
fn test_backup_written_once_and_never_refreshed() {
    let store = MemoryItineraryStore::new();
    let first_raw = geocoded_payload().itinerary;

    save_and_optimize(
        &store,
        "user-1",
        "trip-1",
        geocoded_payload(),
        &OptimizeOptions::default(),
    )
    .unwrap();

    // Second save of the same trip with different content.
    let second = payload(vec![
        vec![activity("solo", Some((12.9716, 77.5946)))],
        Vec::new(),
    ]);
    save_and_optimize(&store, "user-1", "trip-1", second, &OptimizeOptions::default()).unwrap();

    let stored = store.get("user-1", "trip-1").unwrap().unwrap();
    assert_eq!(
        stored.itinerary_original_backup,
        Some(first_raw),
        "backup must capture the state of the FIRST optimization only"
    );
    assert_eq!(stored.itinerary.activity_count(), 1);
}

#[test]
fn test_ungeocoded_payload_keeps_raw_itinerary() {
    let store = MemoryItineraryStore::new();
    let raw = payload(vec![
        vec![activity("a", None), activity("b", None)],
        vec![activity("c", None)],
    ]);

    let doc = save_and_optimize(
        &store,
        "user-1",
        "trip-1",
        raw.clone(),
        &OptimizeOptions::default(),
    )
    .unwrap();

    // Degenerate success: raw order survives untouched, no backup taken.
    assert_eq!(doc.itinerary, raw.itinerary);
    let stored = store.get("user-1", "trip-1").unwrap().unwrap();
    assert_eq!(stored.itinerary, raw.itinerary);
    assert!(stored.itinerary_original_backup.is_none());
}

#[test]
fn test_mixed_geocoding_conserves_every_activity() {
    let store = MemoryItineraryStore::new();
    let mixed = payload(vec![
        vec![
            activity("geo-1", Some((12.9507, 77.5848))),
            activity("raw-1", None),
        ],
        vec![activity("geo-2", Some((12.9987, 77.5920)))],
    ]);

    let doc = save_and_optimize(&store, "user-1", "trip-1", mixed, &OptimizeOptions::default())
        .unwrap();

    assert_eq!(
        sorted_ids(&doc.itinerary),
        vec!["geo-1", "geo-2", "raw-1"]
    );
    // The un-geocoded stop stays on its original day, after routed stops.
    let day1 = &doc.itinerary.days[0];
    assert_eq!(day1.activities.last().map(|a| a.id.as_str()), Some("raw-1"));
}

#[test]
fn test_payload_extras_survive_the_pipeline() {
    let store = MemoryItineraryStore::new();
    let mut incoming = geocoded_payload();
    incoming.extra.insert(
        "trip_name".to_string(),
        serde_json::Value::String("South sweep".to_string()),
    );

    save_and_optimize(&store, "user-1", "trip-1", incoming, &OptimizeOptions::default()).unwrap();

    let stored = store.get("user-1", "trip-1").unwrap().unwrap();
    assert_eq!(stored.extra.get("trip_name").unwrap(), "South sweep");
}

// ============================================================================
// Manual re-optimization
// ============================================================================

#[test]
fn test_reoptimize_unknown_trip_is_an_error() {
    let store = MemoryItineraryStore::new();
    let err = reoptimize(&store, "user-1", "ghost", &OptimizeOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::MissingItinerary { .. }));
}

#[test]
fn test_reoptimize_rewrites_live_field_only() {
    let store = MemoryItineraryStore::new();
    let first_raw = geocoded_payload().itinerary;
    save_and_optimize(
        &store,
        "user-1",
        "trip-1",
        geocoded_payload(),
        &OptimizeOptions::default(),
    )
    .unwrap();

    // Scramble the live itinerary behind the pipeline's back.
    let scrambled = first_raw.clone();
    store.update_itinerary("user-1", "trip-1", &scrambled).unwrap();

    let doc = reoptimize(&store, "user-1", "trip-1", &OptimizeOptions::default()).unwrap();

    assert_eq!(sorted_ids(&doc.itinerary), sorted_ids(&first_raw));
    let stored = store.get("user-1", "trip-1").unwrap().unwrap();
    assert_eq!(
        stored.itinerary_original_backup,
        Some(first_raw),
        "manual re-optimization must not refresh the backup"
    );
    assert_eq!(stored.location, "Bengaluru");
}

// ============================================================================
// Optimizer unit behavior used by the pipeline
// ============================================================================

#[test]
fn test_optimizer_returns_none_without_coordinates() {
    let mut itinerary = Itinerary::with_day_count(2);
    itinerary.days[0].activities.push(activity("a", None));
    assert!(optimize_itinerary(&itinerary, &OptimizeOptions::default()).is_none());
}

#[test]
fn test_optimizer_scrubs_photo_url_whitespace() {
    let mut itinerary = Itinerary::with_day_count(1);
    let mut stop = activity("a", Some((12.97, 77.59)));
    stop.photo_url = "https://img.example/a b\n.jpg".to_string();
    itinerary.days[0].activities.push(stop);

    let optimized = optimize_itinerary(&itinerary, &OptimizeOptions::default()).unwrap();
    assert_eq!(
        optimized.days[0].activities[0].photo_url,
        "https://img.example/ab.jpg"
    );
}

#[test]
fn test_optimizer_keeps_day_count_with_empty_days() {
    let mut itinerary = Itinerary::with_day_count(4);
    itinerary.days[0]
        .activities
        .push(activity("only", Some((12.97, 77.59))));

    let optimized = optimize_itinerary(&itinerary, &OptimizeOptions::default()).unwrap();
    assert_eq!(optimized.day_count(), 4);
    assert_eq!(optimized.activity_count(), 1);
}

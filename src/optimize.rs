//! Document-level proximity optimization.
//!
//! Bridges the itinerary shape and the route/partition machinery:
//! normalize, route, re-bucket. Ordering and day assignment change;
//! nothing else does.

use tracing::{debug, info};

use crate::model::{Activity, DayPlan, Itinerary};
use crate::partition::{SplitStrategy, partition_days};
use crate::route::RouteOptions;
use crate::traits::Stop;

/// Tuning for a full itinerary optimization.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizeOptions {
    pub strategy: SplitStrategy,
    pub route: RouteOptions,
}

/// A geocoded activity lifted into the routing layer.
struct GeoStop {
    activity: Activity,
    position: (f64, f64),
}

impl Stop for GeoStop {
    fn position(&self) -> (f64, f64) {
        self.position
    }
}

/// Re-sequence an itinerary for geographic coherence.
///
/// Returns `None` when no activity carries coordinates. That is a
/// degenerate success, not an error; callers keep the input as
/// authoritative.
/// Activities without coordinates keep their day label and are appended,
/// unordered, after that day's routed stops (final day if the label is
/// gone). The activity multiset is conserved.
pub fn optimize_itinerary(itinerary: &Itinerary, options: &OptimizeOptions) -> Option<Itinerary> {
    let num_days = itinerary.day_count();
    let mut geocoded = Vec::new();
    let mut ungeocoded: Vec<(String, Activity)> = Vec::new();

    for day in &itinerary.days {
        for activity in &day.activities {
            let mut activity = activity.clone();
            // Photo URLs occasionally arrive with stray whitespace.
            activity.photo_url.retain(|c| !c.is_whitespace());
            match activity.coordinates {
                Some(coords) => geocoded.push(GeoStop {
                    position: coords.as_tuple(),
                    activity,
                }),
                None => ungeocoded.push((day.label.clone(), activity)),
            }
        }
    }

    if geocoded.is_empty() {
        debug!("no geocoded stops to optimize");
        return None;
    }
    info!(stops = geocoded.len(), days = num_days, "optimizing itinerary");

    let buckets = partition_days(geocoded, num_days, options.strategy, &options.route);
    let mut optimized = Itinerary {
        days: buckets
            .into_iter()
            .enumerate()
            .map(|(i, bucket)| DayPlan {
                label: format!("Day {}", i + 1),
                activities: bucket.into_iter().map(|stop| stop.activity).collect(),
            })
            .collect(),
    };

    for (label, activity) in ungeocoded {
        let target = optimized
            .days
            .iter()
            .position(|day| day.label == label)
            .unwrap_or(num_days - 1);
        optimized.days[target].activities.push(activity);
    }

    Some(optimized)
}

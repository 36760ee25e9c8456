//! Route construction: nearest-neighbor ordering plus 2-opt refinement.
//!
//! Open-path heuristics over great-circle distance. No optimality
//! guarantee; the 2-opt pass cap bounds worst-case latency instead of a
//! timeout or cancellation token.

use crate::geo::haversine_km;
use crate::traits::Stop;

/// Improvements below this are float noise, not progress.
const EPSILON: f64 = 1e-9;

/// Where nearest-neighbor construction starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPolicy {
    /// Start at the first input stop. Right for day-local routes where the
    /// existing first stop anchors the day.
    #[default]
    FirstStop,
    /// Start at the stop with the lowest total distance to all others.
    /// Right for a single global route, where starting at an outlying
    /// point would drag the whole path out to it first.
    MostCentral,
}

/// Tuning for route construction.
#[derive(Debug, Clone, Copy)]
pub struct RouteOptions {
    pub start: StartPolicy,
    /// Upper bound on full 2-opt passes.
    pub max_refine_passes: usize,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            start: StartPolicy::FirstStop,
            max_refine_passes: 12,
        }
    }
}

/// Sum of consecutive-pair distances along an open path, in kilometers.
pub fn route_cost<S: Stop>(stops: &[S]) -> f64 {
    stops
        .windows(2)
        .map(|pair| haversine_km(pair[0].position(), pair[1].position()))
        .sum()
}

/// Order stops into a short open path.
///
/// Nearest-neighbor construction from the configured start, then 2-opt
/// segment reversal until a full pass yields no improvement or the pass
/// cap is reached. Zero or one stop comes back unchanged.
///
/// Both phases are O(n²) per pass. Fine for itineraries of tens of
/// stops, not meant for hundreds.
pub fn build_route<S: Stop>(stops: Vec<S>, options: &RouteOptions) -> Vec<S> {
    if stops.len() < 2 {
        return stops;
    }
    let mut route = nearest_neighbor(stops, options.start);
    refine(&mut route, options.max_refine_passes);
    route
}

/// Greedy construction: always travel next to the closest unvisited stop.
/// Ties keep the earliest input position.
fn nearest_neighbor<S: Stop>(mut unvisited: Vec<S>, start: StartPolicy) -> Vec<S> {
    let start_index = match start {
        StartPolicy::FirstStop => 0,
        StartPolicy::MostCentral => most_central(&unvisited),
    };

    let mut route = Vec::with_capacity(unvisited.len());
    route.push(unvisited.remove(start_index));

    while !unvisited.is_empty() {
        let last = route[route.len() - 1].position();
        let mut nearest = 0;
        let mut nearest_dist = f64::INFINITY;
        for (i, stop) in unvisited.iter().enumerate() {
            let dist = haversine_km(last, stop.position());
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest = i;
            }
        }
        route.push(unvisited.remove(nearest));
    }

    route
}

fn most_central<S: Stop>(stops: &[S]) -> usize {
    let mut best = 0;
    let mut best_total = f64::INFINITY;
    for (i, candidate) in stops.iter().enumerate() {
        let total: f64 = stops
            .iter()
            .map(|other| haversine_km(candidate.position(), other.position()))
            .sum();
        if total < best_total {
            best_total = total;
            best = i;
        }
    }
    best
}

/// 2-opt local search, open-path variant: reversing `route[i..=j]` only
/// changes the edges entering and leaving the segment, so each candidate
/// is scored on those two edges alone.
fn refine<S: Stop>(route: &mut [S], max_passes: usize) {
    let n = route.len();
    if n < 3 {
        return;
    }

    for pass in 0..max_passes {
        let mut improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                // Reversing the entire open path changes nothing.
                if i == 0 && j == n - 1 {
                    continue;
                }
                let mut current = 0.0;
                let mut reversed = 0.0;
                if i > 0 {
                    current += haversine_km(route[i - 1].position(), route[i].position());
                    reversed += haversine_km(route[i - 1].position(), route[j].position());
                }
                if j < n - 1 {
                    current += haversine_km(route[j].position(), route[j + 1].position());
                    reversed += haversine_km(route[i].position(), route[j + 1].position());
                }
                if reversed + EPSILON < current {
                    route[i..=j].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            tracing::debug!(passes = pass + 1, "2-opt converged");
            return;
        }
    }
    tracing::debug!(passes = max_passes, "2-opt pass cap reached");
}

//! Day partitioning: split stops into one bucket per trip day.
//!
//! Two strategies exist as distinct design points and are never blended:
//! route-then-split (the default) and cluster-then-route (the legacy
//! shape, kept selectable).

use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::Array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::route::{RouteOptions, StartPolicy, build_route};
use crate::traits::Stop;

/// Fixed seed keeps cluster assignments reproducible run to run.
const KMEANS_SEED: u64 = 42;
const KMEANS_MAX_ITERATIONS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Route all stops once (central start), then cut the path into
    /// contiguous, size-balanced chunks with larger chunks on earlier
    /// days.
    #[default]
    GlobalRouteSplit,
    /// K-means the stops into one geographic cluster per day, then route
    /// each cluster independently from its first member.
    ClusterThenRoute,
}

/// Split stops into exactly `num_days` ordered buckets.
///
/// Buckets may come back empty; a day is never merged or dropped. With
/// fewer stops than days the tail days are the empty ones.
pub fn partition_days<S: Stop>(
    stops: Vec<S>,
    num_days: usize,
    strategy: SplitStrategy,
    route_options: &RouteOptions,
) -> Vec<Vec<S>> {
    if num_days == 0 {
        return Vec::new();
    }
    match strategy {
        SplitStrategy::GlobalRouteSplit => global_route_split(stops, num_days, route_options),
        SplitStrategy::ClusterThenRoute => cluster_then_route(stops, num_days, route_options),
    }
}

fn global_route_split<S: Stop>(
    stops: Vec<S>,
    num_days: usize,
    route_options: &RouteOptions,
) -> Vec<Vec<S>> {
    let global = RouteOptions {
        start: StartPolicy::MostCentral,
        ..*route_options
    };
    let route = build_route(stops, &global);
    split_balanced(route, num_days)
}

/// Contiguous chunks with sizes differing by at most one; the first
/// `total % num_days` chunks carry the extra stop.
fn split_balanced<S>(route: Vec<S>, num_days: usize) -> Vec<Vec<S>> {
    let base = route.len() / num_days;
    let remainder = route.len() % num_days;

    let mut buckets = Vec::with_capacity(num_days);
    let mut rest = route.into_iter();
    for day in 0..num_days {
        let size = base + usize::from(day < remainder);
        buckets.push(rest.by_ref().take(size).collect());
    }
    buckets
}

fn cluster_then_route<S: Stop>(
    stops: Vec<S>,
    num_days: usize,
    route_options: &RouteOptions,
) -> Vec<Vec<S>> {
    let day_options = RouteOptions {
        start: StartPolicy::FirstStop,
        ..*route_options
    };

    let k = num_days.min(stops.len());
    if k <= 1 {
        let mut buckets: Vec<Vec<S>> = (0..num_days).map(|_| Vec::new()).collect();
        if !stops.is_empty() {
            buckets[0] = build_route(stops, &day_options);
        }
        return buckets;
    }

    let Some(assignments) = cluster_assignments(&stops, k) else {
        warn!(k, "k-means did not converge; falling back to route-then-split");
        return global_route_split(stops, num_days, route_options);
    };

    let mut buckets: Vec<Vec<S>> = (0..num_days).map(|_| Vec::new()).collect();
    for (stop, cluster) in stops.into_iter().zip(assignments) {
        buckets[cluster].push(stop);
    }

    buckets
        .into_iter()
        .map(|bucket| build_route(bucket, &day_options))
        .collect()
}

fn cluster_assignments<S: Stop>(stops: &[S], k: usize) -> Option<Vec<usize>> {
    let coords: Vec<f64> = stops
        .iter()
        .flat_map(|stop| {
            let (lat, lng) = stop.position();
            [lat, lng]
        })
        .collect();
    let observations = Array::from_shape_vec((stops.len(), 2), coords).ok()?;
    let dataset = Dataset::from(observations);

    let model = KMeans::params_with_rng(k, StdRng::seed_from_u64(KMEANS_SEED))
        .max_n_iterations(KMEANS_MAX_ITERATIONS)
        .fit(&dataset)
        .ok()?;
    let predictions = model.predict(&dataset);
    Some(predictions.iter().copied().collect())
}

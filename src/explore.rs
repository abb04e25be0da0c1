//! Graph analyses over the selected places.
//!
//! Neither analysis feeds the optimized itinerary. [`reachable`] answers
//! "what can I get to from here within N km", [`explore_paths`] enumerates
//! the solution space up to a depth for inspection.

use std::collections::VecDeque;

use rayon::prelude::*;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::PlannerError;
use crate::model::{Coordinate, Place, ReachabilitySet};
use crate::profile::TravelProfile;
use crate::router::resolve_distance;
use crate::traits::RouteProvider;

/// Breadth-first search for places within `max_distance_km` of `start`.
///
/// The root is the place with the shortest road distance from `start`. A
/// neighbour is enqueued when its hop from the current node fits the budget,
/// but it is only reported when its distance from the root also fits.
///
/// Distances from the root come from the root's own expansion batch, which
/// covers every other place since nothing else is visited yet. Each frontier
/// node's neighbours are looked up as one concurrent batch.
pub fn reachable<P>(
    provider: &P,
    places: &[Place],
    start: Coordinate,
    max_distance_km: f64,
    profile: TravelProfile,
    max_concurrent: usize,
    cancel: Option<&CancelToken>,
) -> Result<ReachabilitySet, PlannerError>
where
    P: RouteProvider + Sync + ?Sized,
{
    if places.is_empty() {
        return Ok(ReachabilitySet::default());
    }

    let threads = max_concurrent.clamp(1, places.len());
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let batch = |from: Coordinate, targets: &[usize]| -> Result<Vec<f64>, PlannerError> {
        pool.install(|| {
            targets
                .par_iter()
                .map(|&idx| resolve_distance(provider, from, places[idx].location, profile, cancel))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|_| PlannerError::Cancelled)
        .and_then(|distances| {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                Err(PlannerError::Cancelled)
            } else {
                Ok(distances)
            }
        })
    };

    let all: Vec<usize> = (0..places.len()).collect();
    let from_start = batch(start, &all)?;
    let root = nearest(&from_start);
    debug!(root, distance_km = from_start[root], "reachability root selected");

    let others: Vec<usize> = all.iter().copied().filter(|&idx| idx != root).collect();
    let mut from_root = vec![0.0; places.len()];
    for (&idx, &distance) in others.iter().zip(&batch(places[root].location, &others)?) {
        from_root[idx] = distance;
    }

    let mut visited = vec![false; places.len()];
    visited[root] = true;

    let mut queue = VecDeque::from([root]);
    let mut result = Vec::new();

    while let Some(current) = queue.pop_front() {
        if from_root[current] <= max_distance_km {
            result.push(current);
        }

        let candidates: Vec<usize> = all.iter().copied().filter(|&idx| !visited[idx]).collect();
        if candidates.is_empty() {
            continue;
        }
        let hops = if current == root {
            candidates.iter().map(|&idx| from_root[idx]).collect()
        } else {
            batch(places[current].location, &candidates)?
        };

        for (&idx, &hop) in candidates.iter().zip(&hops) {
            if hop <= max_distance_km {
                visited[idx] = true;
                queue.push_back(idx);
            }
        }
    }

    debug!(reachable = result.len(), "reachability search finished");
    Ok(ReachabilitySet {
        root: Some(root),
        reachable: result,
    })
}

/// Lowest distance, lowest index on ties.
fn nearest(distances: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &distance) in distances.iter().enumerate().skip(1) {
        if distance < distances[best] {
            best = idx;
        }
    }
    best
}

/// Depth-first enumeration of simple paths starting at `start_index`.
///
/// A path is recorded once it has `max_depth` hops or has visited every
/// place. Paths come out in lexicographic order of their indices. The count
/// grows combinatorially, so keep `max_depth` small.
pub fn explore_paths(
    places: &[Place],
    start_index: usize,
    max_depth: usize,
) -> Result<Vec<Vec<usize>>, PlannerError> {
    if start_index >= places.len() {
        return Err(PlannerError::StartIndexOutOfRange {
            index: start_index,
            len: places.len(),
        });
    }

    let mut results = Vec::new();
    let mut stack = vec![vec![start_index]];

    while let Some(path) = stack.pop() {
        let children: Vec<usize> = (0..places.len())
            .filter(|idx| !path.contains(idx))
            .collect();
        if path.len() > max_depth || children.is_empty() {
            results.push(path);
            continue;
        }
        // Reverse so the lowest index is popped first.
        for child in children.into_iter().rev() {
            let mut next = path.clone();
            next.push(child);
            stack.push(next);
        }
    }

    debug!(paths = results.len(), max_depth, "path exploration finished");
    Ok(results)
}

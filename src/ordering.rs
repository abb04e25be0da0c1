//! Nearest-neighbour visiting order.
//!
//! Runs entirely on great-circle distance so ordering stays instantaneous;
//! the routing provider is only consulted afterwards, for the chosen legs.

use crate::haversine::haversine_km;
use crate::model::{Coordinate, Place, RouteOrder};

/// Order `places` greedily, always moving to the closest unvisited stop.
///
/// With a `start` point the tour begins at the place nearest to it and that
/// index is reported as `start_index`; otherwise it begins at index 0. Ties
/// go to the lowest original index.
pub fn greedy_order(places: &[Place], start: Option<Coordinate>) -> RouteOrder {
    match places.len() {
        0 => return RouteOrder::default(),
        1 => {
            return RouteOrder {
                sequence: vec![0],
                start_index: None,
            };
        }
        _ => {}
    }

    let (first, start_index) = match start {
        Some(point) => {
            let nearest = nearest_index(point, places, |_| true);
            (nearest, Some(nearest))
        }
        None => (0, None),
    };

    let mut visited = vec![false; places.len()];
    let mut sequence = Vec::with_capacity(places.len());
    let mut current = first;

    loop {
        visited[current] = true;
        sequence.push(current);
        if sequence.len() == places.len() {
            break;
        }
        current = nearest_index(places[current].location, places, |idx| !visited[idx]);
    }

    RouteOrder {
        sequence,
        start_index,
    }
}

/// Closest eligible place to `from`; strict `<` keeps the lowest index on ties.
fn nearest_index(from: Coordinate, places: &[Place], eligible: impl Fn(usize) -> bool) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (idx, place) in places.iter().enumerate() {
        if !eligible(idx) {
            continue;
        }
        let dist = haversine_km(from, place.location);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx).unwrap_or(0)
}

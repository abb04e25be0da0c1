//! Concurrent resolution of every leg of an ordered tour.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::error::PlannerError;
use crate::model::{Coordinate, LegEndpoint, Place, RouteLeg, RouteOrder};
use crate::profile::TravelProfile;
use crate::router::resolve_leg;
use crate::traits::RouteProvider;

/// One leg awaiting a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LegPlan {
    from: LegEndpoint,
    to: LegEndpoint,
    from_coord: Coordinate,
    to_coord: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedLegs {
    pub legs: Vec<RouteLeg>,
    pub total_distance_km: f64,
    /// Only legs with a real duration contribute.
    pub total_duration_secs: f64,
}

/// Legs in definition order: an optional start leg, then one per
/// consecutive pair in `order`.
pub(crate) fn plan_legs(
    places: &[Place],
    order: &RouteOrder,
    start: Option<Coordinate>,
) -> Result<Vec<LegPlan>, PlannerError> {
    if let Some(&index) = order.sequence.iter().find(|&&idx| idx >= places.len()) {
        return Err(PlannerError::OrderOutOfRange {
            index,
            len: places.len(),
        });
    }

    let mut plans = Vec::with_capacity(order.len());

    if let (Some(start), Some(&first)) = (start, order.sequence.first()) {
        plans.push(LegPlan {
            from: LegEndpoint::Start,
            to: LegEndpoint::Place(first),
            from_coord: start,
            to_coord: places[first].location,
        });
    }

    for pair in order.sequence.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        plans.push(LegPlan {
            from: LegEndpoint::Place(from),
            to: LegEndpoint::Place(to),
            from_coord: places[from].location,
            to_coord: places[to].location,
        });
    }

    Ok(plans)
}

/// Resolve all legs of `order` against the routing provider.
///
/// Lookups run concurrently on a pool of at most `max_concurrent` threads.
/// A failed lookup only affects its own leg (great-circle fallback). The
/// result is all-or-nothing: if `cancel` trips before every leg is resolved,
/// including while lookups are in flight, no legs are returned. An order
/// that refers to a missing place is rejected before any lookup.
pub fn fetch_legs<P>(
    provider: &P,
    places: &[Place],
    order: &RouteOrder,
    start: Option<Coordinate>,
    profile: TravelProfile,
    max_concurrent: usize,
    cancel: Option<&CancelToken>,
) -> Result<FetchedLegs, PlannerError>
where
    P: RouteProvider + Sync + ?Sized,
{
    let plans = plan_legs(places, order, start)?;
    if plans.is_empty() {
        return Ok(FetchedLegs {
            legs: Vec::new(),
            total_distance_km: 0.0,
            total_duration_secs: 0.0,
        });
    }

    let threads = max_concurrent.clamp(1, plans.len());
    debug!(legs = plans.len(), threads, "fetching route legs");
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    // `collect` keeps definition order regardless of completion order.
    let resolved = pool
        .install(|| {
            plans
                .par_iter()
                .map(|plan| resolve_leg(provider, plan.from_coord, plan.to_coord, profile, cancel))
                .collect::<Result<Vec<_>, _>>()
        })
        // resolve_leg only errors once the token has tripped.
        .map_err(|_| PlannerError::Cancelled)?;
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(PlannerError::Cancelled);
    }

    let legs: Vec<RouteLeg> = plans
        .iter()
        .zip(resolved)
        .map(|(plan, leg)| RouteLeg {
            from: plan.from,
            to: plan.to,
            distance_km: leg.distance_km,
            duration_secs: leg.duration_secs,
            geometry: leg.geometry,
            is_long: false,
        })
        .collect();

    let total_distance_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
    let total_duration_secs: f64 = legs.iter().filter_map(|leg| leg.duration_secs).sum();
    let fallbacks = legs.iter().filter(|leg| leg.is_fallback()).count();
    info!(
        legs = legs.len(),
        fallbacks,
        total_distance_km,
        total_duration_secs,
        "route legs resolved"
    );

    Ok(FetchedLegs {
        legs,
        total_distance_km,
        total_duration_secs,
    })
}

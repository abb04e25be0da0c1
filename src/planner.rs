//! Caller-facing entry points.
//!
//! Each call is a pure function of its inputs plus routing-provider lookups:
//! validate, order cheaply, resolve legs concurrently, flag long legs.

use tracing::{info, instrument};

use crate::cancel::CancelToken;
use crate::classify::classify;
use crate::error::PlannerError;
use crate::explore;
use crate::model::{Coordinate, OptimizedRoute, Place, ReachabilitySet, RouteOrder};
use crate::ordering::greedy_order;
use crate::profile::TravelProfile;
use crate::segments::fetch_legs;
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Legs strictly longer than this are flagged.
    pub threshold_km: f64,
    /// Upper bound on simultaneous provider lookups per request.
    pub max_concurrent_lookups: usize,
    /// Aborts pending lookups; the request then fails with `Cancelled`.
    pub cancel: Option<CancelToken>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            threshold_km: 50.0,
            max_concurrent_lookups: 8,
            cancel: None,
        }
    }
}

/// Order `places`, resolve each leg on the road network and flag long legs.
///
/// An empty place list is rejected before any lookup. A single place yields
/// a one-stop route with no legs. Lookups that fail fall back to great-circle
/// distance, so the call completes even with the provider fully down.
#[instrument(skip_all, fields(places = places.len(), profile = ?profile))]
pub fn compute_optimized_route<P>(
    provider: &P,
    places: &[Place],
    start: Option<Coordinate>,
    profile: TravelProfile,
    options: &PlannerOptions,
) -> Result<OptimizedRoute, PlannerError>
where
    P: RouteProvider + Sync + ?Sized,
{
    validate_places(places)?;
    if let Some(point) = start {
        validate_coordinate("start", point)?;
    }
    validate_distance(options.threshold_km)?;

    if places.len() == 1 {
        return Ok(OptimizedRoute {
            order: RouteOrder {
                sequence: vec![0],
                start_index: None,
            },
            legs: Vec::new(),
            total_distance_km: 0.0,
            total_duration_secs: 0.0,
            threshold_km: options.threshold_km,
            profile,
            long_leg_indices: Vec::new(),
        });
    }

    let order = greedy_order(places, start);
    let mut fetched = fetch_legs(
        provider,
        places,
        &order,
        start,
        profile,
        options.max_concurrent_lookups,
        options.cancel.as_ref(),
    )?;
    let long_leg_indices = classify(&mut fetched.legs, options.threshold_km);

    info!(
        legs = fetched.legs.len(),
        long = long_leg_indices.len(),
        total_distance_km = fetched.total_distance_km,
        "route optimized"
    );

    Ok(OptimizedRoute {
        order,
        legs: fetched.legs,
        total_distance_km: fetched.total_distance_km,
        total_duration_secs: fetched.total_duration_secs,
        threshold_km: options.threshold_km,
        profile,
        long_leg_indices,
    })
}

/// Places reachable from `start` within `max_distance_km`.
#[instrument(skip_all, fields(places = places.len(), max_distance_km = max_distance_km, profile = ?profile))]
pub fn compute_reachability<P>(
    provider: &P,
    places: &[Place],
    start: Coordinate,
    max_distance_km: f64,
    profile: TravelProfile,
    options: &PlannerOptions,
) -> Result<ReachabilitySet, PlannerError>
where
    P: RouteProvider + Sync + ?Sized,
{
    for place in places {
        validate_coordinate(&place.id, place.location)?;
    }
    validate_coordinate("start", start)?;
    validate_distance(max_distance_km)?;

    explore::reachable(
        provider,
        places,
        start,
        max_distance_km,
        profile,
        options.max_concurrent_lookups,
        options.cancel.as_ref(),
    )
}

/// Enumerate simple paths from `start_index`, at most `max_depth` hops long.
pub fn explore_paths(
    places: &[Place],
    start_index: usize,
    max_depth: usize,
) -> Result<Vec<Vec<usize>>, PlannerError> {
    explore::explore_paths(places, start_index, max_depth)
}

fn validate_places(places: &[Place]) -> Result<(), PlannerError> {
    if places.is_empty() {
        return Err(PlannerError::NoPlaces);
    }
    for place in places {
        validate_coordinate(&place.id, place.location)?;
    }
    Ok(())
}

fn validate_coordinate(what: &str, coord: Coordinate) -> Result<(), PlannerError> {
    if coord.is_valid() {
        Ok(())
    } else {
        Err(PlannerError::InvalidCoordinate {
            what: what.to_string(),
            lat: coord.lat,
            lng: coord.lng,
        })
    }
}

fn validate_distance(km: f64) -> Result<(), PlannerError> {
    if km.is_finite() && km >= 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidThreshold(km))
    }
}

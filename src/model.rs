//! Value types shared by the planner stages.
//!
//! Everything here is created fresh per request and handed back to the
//! caller; nothing is cached between requests.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;
use crate::profile::TravelProfile;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A selectable stop from the caller's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub description: String,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One end of a leg: either the free-standing start point or a place index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegEndpoint {
    Start,
    Place(usize),
}

/// A single directed hop of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: LegEndpoint,
    pub to: LegEndpoint,
    pub distance_km: f64,
    /// Absent when the provider lookup failed and great-circle distance was used.
    pub duration_secs: Option<f64>,
    /// Absent on fallback.
    pub geometry: Option<Polyline>,
    pub is_long: bool,
}

impl RouteLeg {
    /// A leg resolved without the routing provider.
    pub fn is_fallback(&self) -> bool {
        self.duration_secs.is_none()
    }
}

/// Visiting order over the input places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOrder {
    /// A permutation of `0..places.len()`.
    pub sequence: Vec<usize>,
    /// The place picked as nearest to the start point, if one was given.
    pub start_index: Option<usize>,
}

impl RouteOrder {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Full result of an optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub order: RouteOrder,
    pub legs: Vec<RouteLeg>,
    pub total_distance_km: f64,
    /// Sum over legs that carry a real duration.
    pub total_duration_secs: f64,
    pub threshold_km: f64,
    pub profile: TravelProfile,
    /// Positions in `legs` whose distance exceeds the threshold, in leg order.
    pub long_leg_indices: Vec<usize>,
}

impl OptimizedRoute {
    pub fn long_legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.long_leg_indices.iter().map(|&idx| &self.legs[idx])
    }

    pub fn fallback_legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs.iter().filter(|leg| leg.is_fallback())
    }

    /// Trip time for display: real durations where known, otherwise the
    /// leg distance at the profile's nominal speed.
    pub fn estimated_trip_seconds(&self) -> f64 {
        self.legs
            .iter()
            .map(|leg| {
                leg.duration_secs
                    .unwrap_or_else(|| self.profile.estimate_seconds(leg.distance_km))
            })
            .sum()
    }

    pub fn estimated_cost(&self) -> f64 {
        self.total_distance_km * self.profile.cost_per_km()
    }
}

/// Places reachable from a start point within a distance budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilitySet {
    /// Search root: the place nearest to the start point.
    pub root: Option<usize>,
    /// Reachable place indices in the order they were dequeued.
    pub reachable: Vec<usize>,
}

impl ReachabilitySet {
    pub fn contains(&self, index: usize) -> bool {
        self.reachable.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.reachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }
}

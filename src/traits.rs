//! Seams between the planner and its routing provider.

use std::time::Duration;

use crate::error::LookupError;
use crate::model::Coordinate;
use crate::polyline::Polyline;
use crate::profile::TravelProfile;

/// Real-road measurements for one origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFragment {
    pub distance_km: f64,
    pub duration_secs: f64,
    pub geometry: Polyline,
}

/// Looks up the road route between two points.
///
/// Implementations issue at most one request per call and never retry.
/// Any failure is reported as a [`LookupError`]; callers fall back to
/// great-circle distance (see [`crate::router::resolve_leg`]).
pub trait RouteProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError>;

    /// Same as [`RouteProvider::route`], giving up once `timeout` elapses.
    ///
    /// The default ignores the bound; network-backed providers should honor it.
    fn route_within(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
        timeout: Option<Duration>,
    ) -> Result<RouteFragment, LookupError> {
        let _ = timeout;
        self.route(from, to, profile)
    }
}

impl<P: RouteProvider + ?Sized> RouteProvider for &P {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        (**self).route(from, to, profile)
    }

    fn route_within(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
        timeout: Option<Duration>,
    ) -> Result<RouteFragment, LookupError> {
        (**self).route_within(from, to, profile, timeout)
    }
}

//! Mock routing providers.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use stop_planner::cancel::CancelToken;
use stop_planner::haversine::haversine_km;
use stop_planner::polyline::Polyline;
use stop_planner::{Coordinate, LookupError, RouteFragment, RouteProvider, TravelProfile};

/// Roads are 25% longer than the straight line.
pub const DETOUR_FACTOR: f64 = 1.25;
const ROAD_SPEED_KMH: f64 = 40.0;

/// Always succeeds with a detour-scaled great-circle distance.
pub struct RoadProvider;

impl RouteProvider for RoadProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        _profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        let distance_km = haversine_km(from, to) * DETOUR_FACTOR;
        Ok(RouteFragment {
            distance_km,
            duration_secs: distance_km / ROAD_SPEED_KMH * 3600.0,
            geometry: Polyline::new(vec![from, to]),
        })
    }
}

/// Exactly the great-circle distance, so graph tests can reason in km.
pub struct StraightLineProvider;

impl RouteProvider for StraightLineProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        _profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        let distance_km = haversine_km(from, to);
        Ok(RouteFragment {
            distance_km,
            duration_secs: distance_km / ROAD_SPEED_KMH * 3600.0,
            geometry: Polyline::new(vec![from, to]),
        })
    }
}

/// Provider that is entirely unavailable.
pub struct DownProvider;

impl RouteProvider for DownProvider {
    fn route(
        &self,
        _from: Coordinate,
        _to: Coordinate,
        _profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        Err(LookupError::Status("InvalidUrl".to_string()))
    }
}

/// Fails every lookup whose destination is in `fail_to`.
pub struct FlakyProvider {
    pub fail_to: Vec<Coordinate>,
}

impl RouteProvider for FlakyProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        if self.fail_to.contains(&to) {
            return Err(LookupError::NoRoute);
        }
        RoadProvider.route(from, to, profile)
    }
}

/// Records every lookup before delegating.
pub struct RecordingProvider<P> {
    pub inner: P,
    pub calls: Mutex<Vec<(Coordinate, Coordinate, TravelProfile)>>,
}

impl<P> RecordingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Coordinate, Coordinate, TravelProfile)> {
        self.calls.lock().unwrap().clone()
    }
}

impl<P: RouteProvider> RouteProvider for RecordingProvider<P> {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        self.calls.lock().unwrap().push((from, to, profile));
        self.inner.route(from, to, profile)
    }
}

/// Sleeps `base_delay`, stretched up to 21x for destinations just east of
/// the prime meridian: on the equator fixture (lng below 0.1) the first legs
/// of an eastbound tour take longest, so later legs finish first. Elsewhere
/// the delay is a flat `base_delay`. Tracks peak concurrency.
pub struct SlowProvider {
    pub base_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowProvider {
    pub fn new(base_delay: Duration) -> Self {
        Self {
            base_delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl RouteProvider for SlowProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let factor = if (0.0..0.1).contains(&to.lng) {
            1.0 + (0.1 - to.lng) * 200.0
        } else {
            1.0
        };
        std::thread::sleep(self.base_delay.mul_f64(factor));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        RoadProvider.route(from, to, profile)
    }
}

/// Trips `token` on the first lookup, simulating a caller-side timeout.
pub struct CancellingProvider {
    pub token: CancelToken,
    pub calls: AtomicUsize,
}

impl CancellingProvider {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RouteProvider for CancellingProvider {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token.cancel();
        RoadProvider.route(from, to, profile)
    }
}

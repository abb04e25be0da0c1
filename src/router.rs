//! Uniform provider-or-fallback resolution for a single hop.
//!
//! Every stage that needs a real distance goes through [`resolve_leg`], so a
//! failed lookup is always replaced the same way: great-circle distance, no
//! duration, no geometry.

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::LookupError;
use crate::haversine::haversine_km;
use crate::model::Coordinate;
use crate::polyline::Polyline;
use crate::profile::TravelProfile;
use crate::traits::RouteProvider;

/// Distance (and, when known, duration and geometry) of one hop.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLeg {
    pub distance_km: f64,
    pub duration_secs: Option<f64>,
    pub geometry: Option<Polyline>,
}

impl ResolvedLeg {
    pub fn fallback(from: Coordinate, to: Coordinate) -> Self {
        Self {
            distance_km: haversine_km(from, to),
            duration_secs: None,
            geometry: None,
        }
    }
}

/// Query the provider and substitute great-circle distance on failure.
///
/// The only error returned is [`LookupError::Cancelled`]: either `cancel` had
/// tripped before the provider was contacted, or it tripped while the lookup
/// was in flight. The provider is told how long remains before the deadline.
pub fn resolve_leg<P>(
    provider: &P,
    from: Coordinate,
    to: Coordinate,
    profile: TravelProfile,
    cancel: Option<&CancelToken>,
) -> Result<ResolvedLeg, LookupError>
where
    P: RouteProvider + ?Sized,
{
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(LookupError::Cancelled);
    }

    let outcome = provider.route_within(from, to, profile, cancel.and_then(CancelToken::remaining));
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(LookupError::Cancelled);
    }

    match outcome {
        Ok(fragment) => {
            debug!(distance_km = fragment.distance_km, "route lookup succeeded");
            Ok(ResolvedLeg {
                distance_km: fragment.distance_km,
                duration_secs: Some(fragment.duration_secs),
                geometry: Some(fragment.geometry),
            })
        }
        Err(err) => {
            warn!(error = %err, ?from, ?to, "route lookup failed, using great-circle distance");
            Ok(ResolvedLeg::fallback(from, to))
        }
    }
}

/// Distance only; used by graph exploration where geometry is not needed.
pub fn resolve_distance<P>(
    provider: &P,
    from: Coordinate,
    to: Coordinate,
    profile: TravelProfile,
    cancel: Option<&CancelToken>,
) -> Result<f64, LookupError>
where
    P: RouteProvider + ?Sized,
{
    resolve_leg(provider, from, to, profile, cancel).map(|leg| leg.distance_km)
}

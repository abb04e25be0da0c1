//! OSRM HTTP adapter for point-to-point routes.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::LookupError;
use crate::model::Coordinate;
use crate::polyline::Polyline;
use crate::profile::TravelProfile;
use crate::traits::{RouteFragment, RouteProvider};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OsrmConfig {
    /// Read `OSRM_BASE_URL` and `OSRM_TIMEOUT_SECS`, keeping defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("OSRM_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = std::env::var("OSRM_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate, profile: TravelProfile) -> String {
        // OSRM wants lng,lat order.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url,
            profile.token(),
            from.lng,
            from.lat,
            to.lng,
            to.lat
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
    ) -> Result<RouteFragment, LookupError> {
        self.route_within(from, to, profile, None)
    }

    /// `timeout` tightens, never extends, the configured client timeout.
    fn route_within(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TravelProfile,
        timeout: Option<Duration>,
    ) -> Result<RouteFragment, LookupError> {
        let url = self.route_url(from, to, profile);
        debug!(%url, ?timeout, "requesting OSRM route");

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout.min(Duration::from_secs(self.config.timeout_secs)));
        }

        let body = request
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        body.into_fragment()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON `[lng, lat]` pairs.
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_fragment(self) -> Result<RouteFragment, LookupError> {
        if self.code != "Ok" {
            return Err(LookupError::Status(self.code));
        }

        let route = self.routes.into_iter().next().ok_or(LookupError::NoRoute)?;
        let points: Vec<Coordinate> = route
            .geometry
            .map(|geometry| {
                geometry
                    .coordinates
                    .into_iter()
                    .map(|[lng, lat]| Coordinate::new(lat, lng))
                    .collect()
            })
            .unwrap_or_default();
        if points.is_empty() {
            return Err(LookupError::NoRoute);
        }

        Ok(RouteFragment {
            distance_km: route.distance / 1000.0,
            duration_secs: route.duration,
            geometry: Polyline::new(points),
        })
    }
}

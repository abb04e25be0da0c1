//! stop-planner core
//!
//! Orders a handful of tourist stops, resolves each leg on the road network
//! (falling back to great-circle distance) and flags legs that are too long.

pub mod cancel;
pub mod classify;
pub mod error;
pub mod explore;
pub mod haversine;
pub mod model;
pub mod ordering;
pub mod osrm;
#[cfg(feature = "dataset-prep")]
pub mod osrm_data;
pub mod planner;
pub mod polyline;
pub mod profile;
pub mod router;
pub mod segments;
pub mod traits;

pub use error::{LookupError, PlannerError};
pub use model::{Coordinate, LegEndpoint, OptimizedRoute, Place, ReachabilitySet, RouteLeg, RouteOrder};
pub use planner::{PlannerOptions, compute_optimized_route, compute_reachability, explore_paths};
pub use profile::TravelProfile;
pub use traits::{RouteFragment, RouteProvider};

//! Error types for the planner.

use thiserror::Error;

/// Errors surfaced to callers of the planner entry points.
///
/// Routing-provider failures never appear here: they are recovered by
/// substituting great-circle distance for the affected leg.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("at least one place is required")]
    NoPlaces,

    #[error("invalid {what} coordinate ({lat}, {lng})")]
    InvalidCoordinate { what: String, lat: f64, lng: f64 },

    #[error("distance threshold must be a finite, non-negative number of km, got {0}")]
    InvalidThreshold(f64),

    #[error("start index {index} is out of range for {len} places")]
    StartIndexOutOfRange { index: usize, len: usize },

    #[error("route order refers to place {index}, but only {len} places were given")]
    OrderOutOfRange { index: usize, len: usize },

    #[error("request was cancelled before all lookups completed")]
    Cancelled,

    #[error("failed to build lookup thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A single routing-provider lookup that did not produce a usable route.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("routing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("routing provider returned status {0}")]
    Status(String),

    #[error("routing provider returned no usable route")]
    NoRoute,

    #[error("lookup skipped after cancellation")]
    Cancelled,
}

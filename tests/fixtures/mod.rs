//! Test fixtures for stop-planner.
//!
//! Provides:
//! - Real Paris landmark coordinates (from OpenStreetMap)
//! - A synthetic triangle with known great-circle side lengths
//! - Mock routing providers (healthy, down, flaky, recording, cancelling)

#![allow(dead_code)]

pub mod paris_landmarks;
pub mod providers;

pub use paris_landmarks::*;
pub use providers::*;

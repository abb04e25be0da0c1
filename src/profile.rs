//! Travel modes and their routing-provider tokens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    Walking,
    Cycling,
    #[default]
    Driving,
}

impl TravelProfile {
    /// Map a UI travel-mode key (`walk`, `bike`, `car`). Unknown keys drive.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "walk" => TravelProfile::Walking,
            "bike" => TravelProfile::Cycling,
            _ => TravelProfile::Driving,
        }
    }

    /// Profile segment used in routing provider URLs.
    pub fn token(&self) -> &'static str {
        match self {
            TravelProfile::Walking => "foot",
            TravelProfile::Cycling => "bike",
            TravelProfile::Driving => "driving",
        }
    }

    /// Nominal speed used to estimate time when no real duration exists.
    pub fn speed_kmh(&self) -> f64 {
        match self {
            TravelProfile::Walking => 5.0,
            TravelProfile::Cycling => 15.0,
            TravelProfile::Driving => 50.0,
        }
    }

    pub fn cost_per_km(&self) -> f64 {
        match self {
            TravelProfile::Walking | TravelProfile::Cycling => 0.0,
            TravelProfile::Driving => 0.20,
        }
    }

    /// Convert distance in km to travel time in seconds at nominal speed.
    pub fn estimate_seconds(&self, km: f64) -> f64 {
        km / self.speed_kmh() * 3600.0
    }
}

//! Paris landmarks for realistic fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Versailles sits well outside the
//! city and makes a natural "too far" stop.

use stop_planner::{Coordinate, Place};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Landmark {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Landmark {
    pub const fn new(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn place(&self) -> Place {
        Place::new(self.id, self.name, self.coords())
    }
}

pub const EIFFEL_TOWER: usize = 0;
pub const ARC_DE_TRIOMPHE: usize = 4;
pub const VERSAILLES: usize = 7;

pub const LANDMARKS: &[Landmark] = &[
    Landmark::new("eiffel", "Eiffel Tower", 48.8584, 2.2945),
    Landmark::new("louvre", "Louvre", 48.8606, 2.3376),
    Landmark::new("notre-dame", "Notre-Dame", 48.8530, 2.3499),
    Landmark::new("sacre-coeur", "Sacre-Coeur", 48.8867, 2.3431),
    Landmark::new("arc", "Arc de Triomphe", 48.8738, 2.2950),
    Landmark::new("orsay", "Musee d'Orsay", 48.8600, 2.3266),
    Landmark::new("pantheon", "Pantheon", 48.8462, 2.3464),
    Landmark::new("versailles", "Chateau de Versailles", 48.8049, 2.1204),
];

pub fn paris_places() -> Vec<Place> {
    LANDMARKS.iter().map(Landmark::place).collect()
}

/// Near-equatorial triangle with great-circle sides A-B = 5 km,
/// B-C = 8 km and A-C = 11 km (to within a few meters).
pub fn triangle_places() -> Vec<Place> {
    vec![
        Place::new("a", "A", Coordinate::new(0.0, 0.0)),
        Place::new("b", "B", Coordinate::new(0.044966, 0.0)),
        Place::new("c", "C", Coordinate::new(0.073744, 0.065938)),
    ]
}

/// Points due east along the equator at the given km offsets.
pub fn equator_places(offsets_km: &[f64]) -> Vec<Place> {
    offsets_km
        .iter()
        .enumerate()
        .map(|(idx, km)| {
            Place::new(
                format!("p{}", idx),
                format!("Point {}", idx),
                Coordinate::new(0.0, km / 111.195),
            )
        })
        .collect()
}

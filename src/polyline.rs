//! Polyline representation for route geometries.
//!
//! Geometries are held as decoded coordinate sequences. The compact encoded
//! form (precision 5) is only produced or consumed at the boundary, e.g. when
//! handing a leg to a map renderer.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::model::Coordinate;

const PRECISION: f64 = 1e5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length of the path through every vertex.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }

    /// Encode as a precision-5 polyline string.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
        for point in &self.points {
            let lat = (point.lat * PRECISION).round() as i64;
            let lng = (point.lng * PRECISION).round() as i64;
            encode_value(lat - prev_lat, &mut out);
            encode_value(lng - prev_lng, &mut out);
            prev_lat = lat;
            prev_lng = lng;
        }
        out
    }

    /// Decode a precision-5 polyline string. Returns `None` on malformed input.
    pub fn decode(encoded: &str) -> Option<Self> {
        let mut bytes = encoded.bytes();
        let mut points = Vec::new();
        let (mut lat, mut lng) = (0i64, 0i64);

        loop {
            let delta_lat = match decode_value(&mut bytes) {
                Some(Ok(value)) => value,
                Some(Err(())) => return None,
                None => break,
            };
            let delta_lng = match decode_value(&mut bytes) {
                Some(Ok(value)) => value,
                _ => return None,
            };
            lat += delta_lat;
            lng += delta_lng;
            points.push(Coordinate::new(
                lat as f64 / PRECISION,
                lng as f64 / PRECISION,
            ));
        }

        Some(Self { points })
    }
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// `None` at end of input, `Err` on a truncated or out-of-range chunk.
fn decode_value(bytes: &mut impl Iterator<Item = u8>) -> Option<Result<i64, ()>> {
    let mut result = 0i64;
    let mut shift = 0;
    let mut first = true;
    loop {
        let byte = match bytes.next() {
            Some(b) => b,
            None if first => return None,
            None => return Some(Err(())),
        };
        first = false;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Some(Err(()));
        }
        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    let value = if result & 1 == 1 { !(result >> 1) } else { result >> 1 };
    Some(Ok(value))
}

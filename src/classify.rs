//! Long-leg flagging.

use crate::model::RouteLeg;

/// Mark each leg whose distance is strictly above `threshold_km`.
///
/// Returns the positions of the long legs, in leg order. Re-running with the
/// same threshold yields the same flags.
pub fn classify(legs: &mut [RouteLeg], threshold_km: f64) -> Vec<usize> {
    for leg in legs.iter_mut() {
        leg.is_long = leg.distance_km > threshold_km;
    }
    long_legs(legs)
}

/// Positions of legs already flagged long.
pub fn long_legs(legs: &[RouteLeg]) -> Vec<usize> {
    legs.iter()
        .enumerate()
        .filter(|(_, leg)| leg.is_long)
        .map(|(idx, _)| idx)
        .collect()
}

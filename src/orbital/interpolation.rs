use super::elements::OrbitalElementRecord;
use crate::types::Vec3;

/// Position between two records at fraction `t` (0 → `a`, 1 → `b`).
///
/// Blends the two solved positions linearly rather than the elements, so the
/// intermediate point sits on the chord, not on the orbit. Good enough for
/// display; not a physical state.
///
/// Weighted as `a·(1−t) + b·t`, which reproduces each endpoint bit-for-bit.
pub fn interpolate(a: &OrbitalElementRecord, b: &OrbitalElementRecord, t: f64) -> Vec3 {
    a.position().lerp(&b.position(), t)
}

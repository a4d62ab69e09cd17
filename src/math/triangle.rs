//! Right-triangle solvers.
//!
//! Naming follows one triangle throughout: legs `opposite` and `adjacent`
//! relative to the angle `alpha`, and the `hypotenuse`. Angles are in degrees
//! and only converted to radians at the trigonometric call.

/// Opposite leg from the adjacent leg and the angle.
#[must_use]
pub fn opposite_from_adjacent(adjacent: f64, alpha: f64) -> f64 {
    adjacent * alpha.to_radians().tan()
}

/// Adjacent leg from the opposite leg and the angle.
#[must_use]
pub fn adjacent_from_opposite(opposite: f64, alpha: f64) -> f64 {
    opposite / alpha.to_radians().tan()
}

/// Hypotenuse from the adjacent leg and the angle.
#[must_use]
pub fn hypotenuse_from_adjacent(adjacent: f64, alpha: f64) -> f64 {
    adjacent / alpha.to_radians().cos()
}

/// Angle opposite to `opposite`, from both legs.
#[must_use]
pub fn angle_from_legs(opposite: f64, adjacent: f64) -> f64 {
    opposite.atan2(adjacent).to_degrees()
}

/// Hypotenuse from both legs.
#[must_use]
pub fn hypotenuse_from_legs(opposite: f64, adjacent: f64) -> f64 {
    opposite.hypot(adjacent)
}

/// Remaining leg from the hypotenuse and one leg.
///
/// Clamped to zero when rounding makes the leg longer than the hypotenuse.
#[must_use]
pub fn leg_from_hypotenuse(hypotenuse: f64, leg: f64) -> f64 {
    (hypotenuse * hypotenuse - leg * leg).max(0.0).sqrt()
}

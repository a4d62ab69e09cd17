pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod triangle;

/// 2D point type.
///
/// Layout coordinates follow the drawing convention of the host document:
/// `y` grows downward, so "up" on the finished sheet is negative `y`.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Returns `true` when `a` and `b` are equal within [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Returns `true` when two points coincide within [`TOLERANCE`].
#[must_use]
pub fn same_point(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

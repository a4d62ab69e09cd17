use tracing::debug;

use crate::math::intersect_2d::line_intersection;
use crate::math::{approx_eq, Point2, Vector2, TOLERANCE};

/// Bevel-inset replacement for the corner `cur` between `prev` and `next`.
///
/// Both incident edges are moved by `distance` along `(dy, -dx) / len`,
/// which is inward for a clockwise polygon (y up) and a positive distance.
/// Returns the point where the moved edges meet, or `None` when either edge
/// has zero length or the moved edges are parallel.
#[must_use]
pub fn inset_corner(prev: &Point2, cur: &Point2, next: &Point2, distance: f64) -> Option<Point2> {
    let d1 = cur - prev;
    let d2 = next - cur;
    let len1 = d1.norm();
    let len2 = d2.norm();
    if len1 < TOLERANCE || len2 < TOLERANCE {
        return None;
    }

    let shift1 = Vector2::new(d1.y, -d1.x) * (distance / len1);
    let shift2 = Vector2::new(d2.y, -d2.x) * (distance / len2);

    let prev_moved = prev + shift1;
    let cur_first = cur + shift1;
    let cur_second = cur + shift2;
    let next_moved = next + shift2;

    if approx_eq(cur_first.x, cur_second.x) && approx_eq(cur_first.y, cur_second.y) {
        return Some(cur_first);
    }

    line_intersection(&prev_moved, &cur_first, &cur_second, &next_moved)
}

/// Insets (or outsets) a closed polygon in place.
///
/// Positive distance insets a clockwise polygon; a negative distance or a
/// counter-clockwise polygon outsets it. The slice must not repeat its first
/// point at the end. Every corner is computed from the un-inset positions of
/// its neighbours. Corners that cannot be inset are left where they are.
#[derive(Debug)]
pub struct InsetPolygon<'a> {
    points: &'a mut [Point2],
    distance: f64,
}

impl<'a> InsetPolygon<'a> {
    /// Creates a new inset operation over an exclusively borrowed buffer.
    #[must_use]
    pub fn new(points: &'a mut [Point2], distance: f64) -> Self {
        Self { points, distance }
    }

    /// Executes the inset, returning the number of corners left unmodified.
    ///
    /// Polygons with fewer than three corners are left untouched and report
    /// zero skipped corners.
    pub fn execute(self) -> usize {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        let original = self.points.to_vec();
        let mut skipped = 0;
        for i in 0..n {
            let prev = &original[(i + n - 1) % n];
            let next = &original[(i + 1) % n];
            if let Some(p) = inset_corner(prev, &original[i], next, self.distance) {
                self.points[i] = p;
            } else {
                skipped += 1;
                debug!(
                    corner = i,
                    x = original[i].x,
                    y = original[i].y,
                    "inset corner left unmodified"
                );
            }
        }
        skipped
    }
}

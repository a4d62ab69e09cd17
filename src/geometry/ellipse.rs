use crate::math::distance_2d::distance;
use crate::math::intersect_2d::ellipse_line_intersection;
use crate::math::Point2;

/// Sampling step, in degrees, used to measure the quadrant's arc length.
const SAMPLE_STEP_DEG: usize = 1;

/// Number of samples across one quadrant (both ends included).
const QUADRANT_SAMPLES: usize = 90 / SAMPLE_STEP_DEG + 1;

/// An axis-aligned ellipse centred on the origin.
///
/// Only the upper-right quadrant is ever evaluated: with the layout's
/// downward `y` axis that is the arc from the apex `(0, -semi_y)` to
/// `(semi_x, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    semi_x: f64,
    semi_y: f64,
}

impl Ellipse {
    /// Creates an ellipse with semi-axis `semi_x` along x and `semi_y` along y.
    #[must_use]
    pub fn new(semi_x: f64, semi_y: f64) -> Self {
        Self { semi_x, semi_y }
    }

    #[must_use]
    pub fn semi_x(&self) -> f64 {
        self.semi_x
    }

    #[must_use]
    pub fn semi_y(&self) -> f64 {
        self.semi_y
    }

    /// Point at polar angle `theta` (degrees), using the ellipse's polar form.
    #[must_use]
    pub fn point_at(&self, theta: f64) -> Point2 {
        let (sin, cos) = theta.to_radians().sin_cos();
        let (a, b) = (self.semi_x, self.semi_y);
        let denom = ((b * cos).powi(2) + (a * sin).powi(2)).sqrt();
        if denom < f64::EPSILON {
            return Point2::origin();
        }
        let radius = a * b / denom;
        Point2::new(radius * cos, radius * sin)
    }

    /// Dense samples of the quadrant from the apex to `(semi_x, 0)`.
    fn quadrant_samples(&self) -> Vec<Point2> {
        let mut samples: Vec<Point2> = (0..QUADRANT_SAMPLES)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let deg = 270.0 + (k * SAMPLE_STEP_DEG) as f64;
                self.point_at(deg)
            })
            .collect();
        samples[0] = Point2::new(0.0, -self.semi_y);
        samples[QUADRANT_SAMPLES - 1] = Point2::new(self.semi_x, 0.0);
        samples
    }

    /// Splits the quadrant into pieces of approximately equal arc length.
    ///
    /// `sides` is the side count of the whole dormer top, so the quadrant
    /// receives `sides / 2` pieces. For an odd count the first piece (at the
    /// apex) is a half piece. Returns the apex followed by every piece end;
    /// the last point is exactly `(semi_x, 0)`.
    #[must_use]
    pub fn quadrant_segments(&self, sides: usize) -> Vec<Point2> {
        let samples = self.quadrant_samples();
        let mut cumulative = Vec::with_capacity(samples.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for w in samples.windows(2) {
            total += distance(&w[0], &w[1]);
            cumulative.push(total);
        }

        let odd = !sides.is_multiple_of(2);
        let count = sides.div_ceil(2);
        #[allow(clippy::cast_precision_loss)]
        let piece = total / (sides as f64 / 2.0);
        let offset = if odd { piece / 2.0 } else { piece };

        let mut out = Vec::with_capacity(count + 1);
        out.push(samples[0]);
        let last = samples.len() - 1;
        let mut prev = 0;
        for k in 0..count {
            if k + 1 == count {
                out.push(samples[last]);
                break;
            }
            #[allow(clippy::cast_precision_loss)]
            let target = offset + k as f64 * piece;
            let idx = nearest_index(&cumulative, target)
                .max(prev + 1)
                .min(last - (count - 1 - k));
            out.push(samples[idx]);
            prev = idx;
        }
        out
    }

    /// Full dormer top from `(-semi_x, 0)` over the apex to `(semi_x, 0)`.
    ///
    /// Always has `sides + 1` points. An even side count peaks in a single
    /// apex vertex. An odd count ends in a flat top segment at the requested
    /// height: the quadrant is re-split on a taller ellipse, the apex and the
    /// half-piece vertex are dropped, and the taller ellipse's crossing with
    /// the line `y = -semi_y` becomes the top vertex.
    #[must_use]
    pub fn dormer_top(&self, sides: usize) -> Vec<Point2> {
        let mut quadrant = self.quadrant_segments(sides);
        let include_apex = sides.is_multiple_of(2);

        if !include_apex && quadrant.len() > 2 {
            let half_vertex = quadrant[1];
            let extra = quadrant[1].y - quadrant[0].y;
            let taller = Ellipse::new(self.semi_x, self.semi_y + extra);
            let mut second = taller.quadrant_segments(sides);
            second.drain(..2);

            let left = Point2::new(-self.semi_x - 10.0, -self.semi_y);
            let right = Point2::new(self.semi_x + 10.0, -self.semi_y);
            let top = ellipse_line_intersection(
                taller.semi_x,
                taller.semi_y,
                &Point2::origin(),
                &left,
                &right,
            )
            .map_or(half_vertex, |(positive, _)| positive);
            second.insert(0, top);
            quadrant = second;
        }

        let skip = usize::from(include_apex);
        let mut top: Vec<Point2> = quadrant[skip..]
            .iter()
            .rev()
            .map(|p| Point2::new(-p.x, p.y))
            .collect();
        top.extend(quadrant);
        top
    }
}

/// Index of the entry in the ascending table `cumulative` closest to `target`.
fn nearest_index(cumulative: &[f64], target: f64) -> usize {
    let upper = cumulative.partition_point(|&c| c < target);
    if upper == 0 {
        return 0;
    }
    if upper >= cumulative.len() {
        return cumulative.len() - 1;
    }
    if target - cumulative[upper - 1] <= cumulative[upper] - target {
        upper - 1
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::distance_2d::{polyline_length, segment_lengths};
    use approx::assert_abs_diff_eq;

    #[test]
    fn point_at_axes() {
        let e = Ellipse::new(3.0, 2.0);
        let apex = e.point_at(270.0);
        assert_abs_diff_eq!(apex.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(apex.y, -2.0, epsilon = 1e-9);
        let side = e.point_at(360.0);
        assert_abs_diff_eq!(side.x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(side.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn point_at_lies_on_ellipse() {
        let e = Ellipse::new(3.0, 2.0);
        for deg in [275.0, 300.0, 333.0, 359.0] {
            let p = e.point_at(deg);
            assert_abs_diff_eq!(p.x * p.x / 9.0 + p.y * p.y / 4.0, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn even_split_has_equal_pieces() {
        let e = Ellipse::new(1.0, 1.5);
        let pts = e.quadrant_segments(12);
        assert_eq!(pts.len(), 7);
        assert_abs_diff_eq!(pts[6].x, 1.0);
        assert_abs_diff_eq!(pts[6].y, 0.0);

        // Chords sum to (slightly less than) the sampled arc length.
        let arc = polyline_length(&e.quadrant_samples());
        assert!(polyline_length(&pts) <= arc + 1e-9);
        assert!(polyline_length(&pts) > arc * 0.98);
    }

    #[test]
    fn pieces_stay_within_sampling_resolution() {
        for (a, b, sides) in [
            (1.0, 1.5, 12),
            (48.0, 144.0, 12),
            (0.5, 0.5, 12),
            (1.0, 1.0, 8),
        ] {
            let e = Ellipse::new(a, b);
            let pts = e.quadrant_segments(sides);
            assert_eq!(pts.len(), sides / 2 + 1);

            let lengths = segment_lengths(&pts);
            #[allow(clippy::cast_precision_loss)]
            let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
            let resolution = segment_lengths(&e.quadrant_samples())
                .into_iter()
                .fold(0.0, f64::max);
            for len in &lengths {
                assert!(
                    (len - mean).abs() <= resolution,
                    "a={a} b={b} sides={sides}: len={len} mean={mean} resolution={resolution}"
                );
            }
        }
    }

    #[test]
    fn odd_split_starts_with_half_piece() {
        let e = Ellipse::new(1.0, 1.0);
        let pts = e.quadrant_segments(5);
        assert_eq!(pts.len(), 4);
        let lengths = segment_lengths(&pts);
        assert!(lengths[0] < lengths[1] * 0.75, "lengths={lengths:?}");
    }

    #[test]
    fn dormer_top_even_has_apex() {
        let e = Ellipse::new(0.5, 0.5);
        let top = e.dormer_top(12);
        assert_eq!(top.len(), 13);
        assert_abs_diff_eq!(top[0].x, -0.5);
        assert_abs_diff_eq!(top[6].x, 0.0);
        assert_abs_diff_eq!(top[6].y, -0.5);
        assert_abs_diff_eq!(top[12].x, 0.5);
        // Mirror symmetric.
        for i in 0..13 {
            assert_abs_diff_eq!(top[i].x, -top[12 - i].x, epsilon = 1e-12);
            assert_abs_diff_eq!(top[i].y, top[12 - i].y, epsilon = 1e-12);
        }
    }

    #[test]
    fn dormer_top_odd_has_flat_top_at_height() {
        let e = Ellipse::new(0.5, 0.5);
        let top = e.dormer_top(5);
        assert_eq!(top.len(), 6);
        assert_abs_diff_eq!(top[2].y, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(top[3].y, -0.5, epsilon = 1e-9);
        assert!(top[3].x > 0.0);
        assert_abs_diff_eq!(top[2].x, -top[3].x, epsilon = 1e-12);
        assert_abs_diff_eq!(top[0].x, -0.5);
        assert_abs_diff_eq!(top[5].x, 0.5);
    }

    #[test]
    fn two_sides_is_a_gable() {
        let top = Ellipse::new(1.0, 0.5).dormer_top(2);
        assert_eq!(top.len(), 3);
        assert_abs_diff_eq!(top[1].y, -0.5);
    }

    #[test]
    fn three_sides_is_a_trapezoid() {
        let top = Ellipse::new(1.0, 0.5).dormer_top(3);
        assert_eq!(top.len(), 4);
        assert_abs_diff_eq!(top[1].y, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(top[2].y, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn nearest_index_picks_closest() {
        let table = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&table, 1.4), 1);
        assert_eq!(nearest_index(&table, 1.6), 2);
        assert_eq!(nearest_index(&table, -1.0), 0);
        assert_eq!(nearest_index(&table, 9.0), 3);
    }
}

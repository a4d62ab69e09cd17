use super::{approx_eq, same_point, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments never intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Returns `true` if segment `a0-a1` crosses segment `b0-b1`.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    segment_segment_intersect_2d(a0, a1, b0, b1).is_some()
}

/// Intersection of the infinite line through `a`,`b` with the one through `c`,`d`.
///
/// The system is translated so `a` is the origin and rotated so `b` lies on
/// the positive x axis; the crossing of `c-d` with that axis is then mapped
/// back. Returns `None` when either line is degenerate or the lines are
/// parallel.
#[must_use]
pub fn line_intersection(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Option<Point2> {
    if same_point(a, b) || same_point(c, d) {
        return None;
    }
    let b = b - a;
    let c = c - a;
    let d = d - a;

    let dist_ab = b.norm();
    let cos = b.x / dist_ab;
    let sin = b.y / dist_ab;

    let (cx, cy) = (c.x * cos + c.y * sin, c.y * cos - c.x * sin);
    let (dx, dy) = (d.x * cos + d.y * sin, d.y * cos - d.x * sin);

    if approx_eq(cy, dy) {
        return None;
    }

    let ab_pos = dx + (cx - dx) * dy / (dy - cy);
    Some(Point2::new(a.x + ab_pos * cos, a.y + ab_pos * sin))
}

/// Intersection of the line through `p1`,`p2` with an axis-aligned ellipse.
///
/// The ellipse has semi-axis `a` along x and `b` along y around `center`.
/// The parametric line is substituted into the implicit ellipse equation.
/// Returns both crossings ordered by descending x (descending y for a
/// vertical line), or `None` if the line misses or only touches the ellipse.
#[must_use]
pub fn ellipse_line_intersection(
    a: f64,
    b: f64,
    center: &Point2,
    p1: &Point2,
    p2: &Point2,
) -> Option<(Point2, Point2)> {
    if a < TOLERANCE || b < TOLERANCE || same_point(p1, p2) {
        return None;
    }
    let dir = p2 - p1;
    let fx = (p1.x - center.x) / a;
    let fy = (p1.y - center.y) / b;
    let gx = dir.x / a;
    let gy = dir.y / b;

    // (fx + t gx)² + (fy + t gy)² = 1
    let qa = gx * gx + gy * gy;
    let qb = 2.0 * (fx * gx + fy * gy);
    let qc = fx * fx + fy * fy - 1.0;
    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant <= 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let first = p1 + dir * ((-qb + root) / (2.0 * qa));
    let second = p1 + dir * ((-qb - root) / (2.0 * qa));

    let first_leads = if approx_eq(first.x, second.x) {
        first.y >= second.y
    } else {
        first.x > second.x
    };
    if first_leads {
        Some((first, second))
    } else {
        Some((second, first))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let d1 = Vector2::new(1.0, 0.0);
        let d2 = Vector2::new(0.0, 1.0);
        let (p1, p2) = (p(0.0, 0.0), p(0.5, -1.0));
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2).unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let d = Vector2::new(1.0, 0.0);
        let (p1, p2) = (p(0.0, 0.0), p(0.0, 1.0));
        assert!(line_line_intersect_2d(&p1, &d, &p2, &d).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let (a0, a1) = (p(0.0, 0.0), p(2.0, 2.0));
        let (b0, b1) = (p(0.0, 2.0), p(2.0, 0.0));
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert_abs_diff_eq!(pt.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pt.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn segment_segment_no_crossing() {
        let (a0, a1) = (p(0.0, 0.0), p(1.0, 0.0));
        let (b0, b1) = (p(0.0, 1.0), p(1.0, 1.0));
        assert!(!segments_intersect(&a0, &a1, &b0, &b1));
    }

    #[test]
    fn segments_short_of_each_other() {
        // The lines cross at (2, 0) but the second segment stops at y = -1.
        let (a0, a1) = (p(0.0, 0.0), p(4.0, 0.0));
        let (b0, b1) = (p(2.0, -3.0), p(2.0, -1.0));
        assert!(!segments_intersect(&a0, &a1, &b0, &b1));
    }

    #[test]
    fn line_intersection_of_axes() {
        let (a, b) = (p(-1.0, 0.0), p(1.0, 0.0));
        let (c, d) = (p(0.0, -1.0), p(0.0, 3.0));
        let pt = line_intersection(&a, &b, &c, &d).unwrap();
        assert_abs_diff_eq!(pt.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn line_intersection_beyond_segments() {
        // Infinite lines, not segments: y = x and y = -x + 10 meet at (5, 5).
        let (a, b) = (p(0.0, 0.0), p(1.0, 1.0));
        let (c, d) = (p(0.0, 10.0), p(1.0, 9.0));
        let pt = line_intersection(&a, &b, &c, &d).unwrap();
        assert_abs_diff_eq!(pt.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pt.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn line_intersection_parallel_or_degenerate() {
        let origin = p(0.0, 0.0);
        let (c, d) = (p(0.0, 1.0), p(1.0, 2.0));
        assert!(line_intersection(&origin, &p(1.0, 1.0), &c, &d).is_none());
        assert!(line_intersection(&origin, &origin, &c, &d).is_none());
        let (x_axis, pt) = (p(1.0, 0.0), p(3.0, 1.0));
        assert!(line_intersection(&origin, &x_axis, &pt, &pt).is_none());
    }

    #[test]
    fn ellipse_horizontal_line() {
        // x²/4 + y² = 1 crossed by y = -0.5 → x = ±√3.
        let (p1, p2) = (p(-10.0, -0.5), p(10.0, -0.5));
        let hit = ellipse_line_intersection(2.0, 1.0, &Point2::origin(), &p1, &p2);
        let (right, left) = hit.unwrap();
        assert_abs_diff_eq!(right.x, 3.0_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(left.x, -(3.0_f64.sqrt()), epsilon = 1e-9);
    }

    #[test]
    fn ellipse_vertical_line() {
        let (p1, p2) = (p(0.0, -5.0), p(0.0, 5.0));
        let hit = ellipse_line_intersection(2.0, 1.0, &Point2::origin(), &p1, &p2);
        let (upper, lower) = hit.unwrap();
        assert_abs_diff_eq!(upper.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lower.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn ellipse_line_miss() {
        let (p1, p2) = (p(-10.0, 2.0), p(10.0, 2.0));
        let hit = ellipse_line_intersection(2.0, 1.0, &Point2::origin(), &p1, &p2);
        assert!(hit.is_none());
    }
}

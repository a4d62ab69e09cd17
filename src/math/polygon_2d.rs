use super::{same_point, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise, measured with the
/// `y` axis pointing up.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the axis-aligned bounding box of `points` as `(min, max)`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bounding_box(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Even-odd point-in-polygon test (ray casting).
///
/// The polygon is implicitly closed. With `bound_check` set, points outside
/// the polygon's bounding box are rejected before the crossing count. Points
/// exactly on an edge get whatever the crossing rule yields.
#[must_use]
pub fn point_in_polygon(polygon: &[Point2], p: &Point2, bound_check: bool) -> bool {
    if polygon.is_empty() {
        return false;
    }
    if bound_check {
        if let Some((min, max)) = bounding_box(polygon) {
            if p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y {
                return false;
            }
        }
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, pi) in polygon.iter().enumerate() {
        let pj = &polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let cross_x = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Removes a trailing point that duplicates the first one.
pub fn strip_closing_point(points: &mut Vec<Point2>) {
    if points.len() > 1 && same_point(&points[0], &points[points.len() - 1]) {
        points.pop();
    }
}

/// Appends a copy of the first point unless the outline is already closed.
pub fn ensure_closing_point(points: &mut Vec<Point2>) {
    let Some(&first) = points.first() else {
        return;
    };
    if points.len() == 1 || !same_point(&first, &points[points.len() - 1]) {
        points.push(first);
    }
}

/// Drops consecutive duplicate points (including a closing duplicate).
#[must_use]
pub fn dedup_consecutive(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !matches!(out.last(), Some(last) if same_point(last, p)) {
            out.push(*p);
        }
    }
    strip_closing_point(&mut out);
    out
}

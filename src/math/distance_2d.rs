use super::Point2;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Lengths of the successive segments of an open polyline.
#[must_use]
pub fn segment_lengths(points: &[Point2]) -> Vec<f64> {
    points.windows(2).map(|w| distance(&w[0], &w[1])).collect()
}

/// Total length of an open polyline.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    segment_lengths(points).iter().sum()
}

/// Returns the minimum distance from point `p` to the segment `a-b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let dir = b - a;
    let len_sq = dir.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return distance(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let param = ((p - a).dot(&dir) / len_sq).clamp(0.0, 1.0);
    distance(p, &(a + dir * param))
}

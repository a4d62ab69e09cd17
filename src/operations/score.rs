use crate::geometry::Path;
use crate::math::{approx_eq, Point2, TOLERANCE};

/// Dash pattern of score (fold) lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSpec {
    /// Length of each gap and each mark. Zero draws a solid line.
    pub dash_length: f64,
}

impl ScoreSpec {
    #[must_use]
    pub fn new(dash_length: f64) -> Self {
        Self { dash_length }
    }

    #[must_use]
    pub fn solid() -> Self {
        Self { dash_length: 0.0 }
    }

    #[must_use]
    pub fn is_solid(&self) -> bool {
        approx_eq(self.dash_length, 0.0)
    }

    /// Same pattern with the dash length multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dash_length: self.dash_length * factor,
        }
    }
}

/// Builds the score line between two points.
///
/// A dashed line starts at the left end of a horizontal segment, the top end
/// (smaller `y`) of a vertical one and the bottom end (larger `y`) of an
/// oblique one. From there it alternates a gap and a mark of the dash length
/// for as long as a whole gap-mark pair still ends one dash length short of
/// the far end. No mark touches either endpoint.
#[derive(Debug)]
pub struct ScoreLine {
    pt1: Point2,
    pt2: Point2,
    spec: ScoreSpec,
}

impl ScoreLine {
    #[must_use]
    pub fn new(pt1: Point2, pt2: Point2, spec: ScoreSpec) -> Self {
        Self { pt1, pt2, spec }
    }

    /// Number of marks drawn on a dashed segment of the given length.
    #[must_use]
    pub fn dash_count(length: f64, dash: f64) -> usize {
        if dash <= 0.0 || length <= dash {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = ((length - dash) / (2.0 * dash) + TOLERANCE).floor() as usize;
        count
    }

    #[must_use]
    pub fn build(&self) -> Path {
        let mut path = Path::new();
        if self.spec.is_solid() {
            path.move_to(self.pt1);
            path.line_to(self.pt2);
            return path;
        }

        let (start, end) = self.dash_direction();
        let span = end - start;
        let length = span.norm();
        if length < TOLERANCE {
            return path;
        }
        let dash = self.spec.dash_length;
        let step = span / length;
        for k in 0..Self::dash_count(length, dash) {
            #[allow(clippy::cast_precision_loss)]
            let gap_end = (2 * k + 1) as f64 * dash;
            path.move_to(start + step * gap_end);
            path.line_to(start + step * (gap_end + dash));
        }
        path
    }

    fn dash_direction(&self) -> (Point2, Point2) {
        let (a, b) = (self.pt1, self.pt2);
        let a_first = if approx_eq(a.y, b.y) {
            a.x < b.x
        } else if approx_eq(a.x, b.x) {
            a.y < b.y
        } else {
            a.y > b.y
        };
        if a_first {
            (a, b)
        } else {
            (b, a)
        }
    }
}

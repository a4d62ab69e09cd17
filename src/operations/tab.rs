use nalgebra::Rotation2;
use tracing::{debug, trace};

use crate::math::intersect_2d::segments_intersect;
use crate::math::polygon_2d::point_in_polygon;
use crate::math::{approx_eq, Point2, Vector2};

/// Largest base angle, in degrees, tried while backing off.
const MAX_BACKOFF_ANGLE: f64 = 88.0;

/// Fraction of the requested height removed per height step.
const HEIGHT_STEP: f64 = 0.2;

/// Height fraction and base angle of the trial tab.
const TRIAL_HEIGHT_FACTOR: f64 = 0.001;
const TRIAL_ANGLE: f64 = 1.0;

/// Size of a trapezoidal glue tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabSpec {
    /// Distance from the edge to the tab's outer side.
    pub height: f64,
    /// Angle between the edge and each tab leg, in degrees.
    pub angle: f64,
}

impl TabSpec {
    #[must_use]
    pub fn new(height: f64, angle: f64) -> Self {
        Self { height, angle }
    }

    /// Shrinks height and angle by the same factor.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            height: self.height * factor,
            angle: self.angle * factor,
        }
    }
}

/// Which side of its outline a tab must lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Outside the outline; the tab folds against a neighbouring panel.
    Outward,
    /// Inside the outline; used for enclosed (hole) outlines.
    Inward,
}

impl Side {
    /// The side a tab belongs on for an outline with the given enclosure.
    #[must_use]
    pub fn for_enclosure(enclosed: bool) -> Self {
        if enclosed {
            Self::Inward
        } else {
            Self::Outward
        }
    }
}

/// Classification of a tab edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeClass {
    Vertical,
    Horizontal,
    /// Neither; `theta` is the edge's angle to the horizontal in degrees.
    Oblique { theta: f64 },
}

impl EdgeClass {
    #[must_use]
    pub fn of(pt1: &Point2, pt2: &Point2) -> Self {
        if approx_eq(pt1.x, pt2.x) {
            Self::Vertical
        } else if approx_eq(pt1.y, pt2.y) {
            Self::Horizontal
        } else {
            let slope = (pt2.y - pt1.y) / (pt2.x - pt1.x);
            Self::Oblique {
                theta: slope.atan().to_degrees(),
            }
        }
    }
}

/// One of the two mirror-image placements of a tab along an edge.
///
/// The primary placement puts the tab to the right of a vertical edge and
/// above (negative `y`) a horizontal one; oblique edges use the horizontal
/// placement rotated by the edge angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub class: EdgeClass,
    pub mirrored: bool,
}

impl Orientation {
    /// Computes the two tab points for the edge `pt1 -> pt2`.
    ///
    /// The first point belongs to `pt1`, the second to `pt2`.
    #[must_use]
    pub fn place(&self, pt1: &Point2, pt2: &Point2, height: f64, angle: f64) -> (Point2, Point2) {
        let normal_sign = if self.mirrored { -1.0 } else { 1.0 };
        let (along, normal) = match self.class {
            EdgeClass::Vertical => (
                Vector2::new(0.0, (pt2.y - pt1.y).signum()),
                Vector2::new(normal_sign, 0.0),
            ),
            EdgeClass::Horizontal | EdgeClass::Oblique { .. } => (
                Vector2::new((pt2.x - pt1.x).signum(), 0.0),
                Vector2::new(0.0, -normal_sign),
            ),
        };
        let run = height / angle.to_radians().tan();
        let mut leg1 = normal * height + along * run;
        let mut leg2 = normal * height - along * run;
        if let EdgeClass::Oblique { theta } = self.class {
            let rotation = Rotation2::new(theta.to_radians());
            leg1 = rotation * leg1;
            leg2 = rotation * leg2;
        }
        (pt1 + leg1, pt2 + leg2)
    }

    #[must_use]
    pub fn mirror(self) -> Self {
        Self {
            mirrored: !self.mirrored,
            ..self
        }
    }
}

/// Escalation state while a tab's legs cross each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Steepening the legs; holds the angle to try.
    TryAngle(f64),
    /// Shortening the tab; holds how many height steps were taken.
    TryHeight(u32),
    /// No adjustment worked; the requested tab is used as is.
    GiveUp,
}

impl Backoff {
    /// The state after a failed attempt. Never returns to an earlier stage.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::TryAngle(angle) => {
                let angle = angle + 1.0;
                if angle > MAX_BACKOFF_ANGLE {
                    Self::TryHeight(1)
                } else {
                    Self::TryAngle(angle)
                }
            }
            Self::TryHeight(step) => {
                if f64::from(step + 1) * HEIGHT_STEP >= 1.0 - 1e-9 {
                    Self::GiveUp
                } else {
                    Self::TryHeight(step + 1)
                }
            }
            Self::GiveUp => Self::GiveUp,
        }
    }

    /// Height and angle to try in this state.
    #[must_use]
    pub fn spec(self, requested: &TabSpec) -> TabSpec {
        match self {
            Self::TryAngle(angle) => TabSpec::new(requested.height, angle),
            Self::TryHeight(step) => TabSpec::new(
                requested.height * (1.0 - f64::from(step) * HEIGHT_STEP),
                requested.angle,
            ),
            Self::GiveUp => *requested,
        }
    }
}

/// Places glue tabs along the edges of one outline.
#[derive(Debug)]
pub struct TabResolver<'a> {
    outline: &'a [Point2],
    enclosed: bool,
}

impl<'a> TabResolver<'a> {
    /// Creates a resolver for `outline` (implicitly closed).
    ///
    /// `enclosed` marks an outline that bounds a hole, whose tabs go inside.
    #[must_use]
    pub fn new(outline: &'a [Point2], enclosed: bool) -> Self {
        Self { outline, enclosed }
    }

    /// Picks the orientation whose tab lies on the wanted side of the edge.
    ///
    /// A tiny trial tab is placed with the primary orientation; if its points
    /// fall on the wrong side of the outline, the mirrored one is used.
    #[must_use]
    pub fn resolve_orientation(
        &self,
        pt1: &Point2,
        pt2: &Point2,
        requested: &TabSpec,
    ) -> Orientation {
        let primary = Orientation {
            class: EdgeClass::of(pt1, pt2),
            mirrored: false,
        };
        let (trial1, trial2) = primary.place(
            pt1,
            pt2,
            requested.height * TRIAL_HEIGHT_FACTOR,
            TRIAL_ANGLE,
        );
        let trial_inside = point_in_polygon(self.outline, &trial1, true)
            || point_in_polygon(self.outline, &trial2, true);
        let trial_side = if trial_inside {
            Side::Inward
        } else {
            Side::Outward
        };
        if trial_side == Side::for_enclosure(self.enclosed) {
            primary
        } else {
            primary.mirror()
        }
    }

    /// Returns the two tab points for the edge `pt1 -> pt2`.
    ///
    /// When the tab legs cross, the base angle is raised a degree at a time
    /// up to 88°, then the height is cut in 20 % steps; if that also fails
    /// the requested tab is returned unchanged.
    #[must_use]
    pub fn resolve(&self, pt1: &Point2, pt2: &Point2, requested: &TabSpec) -> (Point2, Point2) {
        let orientation = self.resolve_orientation(pt1, pt2, requested);
        let mut state = Backoff::TryAngle(requested.angle);
        loop {
            let spec = state.spec(requested);
            let (tab1, tab2) = orientation.place(pt1, pt2, spec.height, spec.angle);
            if state == Backoff::GiveUp {
                debug!(?pt1, ?pt2, "tab legs still cross after backoff");
                return (tab1, tab2);
            }
            if !segments_intersect(pt1, &tab1, pt2, &tab2) {
                return (tab1, tab2);
            }
            let next = state.next();
            trace!(?state, ?next, "tab legs cross");
            state = next;
        }
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

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]
    }

    fn spec() -> TabSpec {
        TabSpec::new(0.5, 45.0)
    }

    #[test]
    fn edge_classes() {
        assert_eq!(
            EdgeClass::of(&p(1.0, 0.0), &p(1.0, 5.0)),
            EdgeClass::Vertical
        );
        assert_eq!(
            EdgeClass::of(&p(0.0, 2.0), &p(5.0, 2.0)),
            EdgeClass::Horizontal
        );
        match EdgeClass::of(&p(0.0, 0.0), &p(1.0, 1.0)) {
            EdgeClass::Oblique { theta } => assert_abs_diff_eq!(theta, 45.0, epsilon = 1e-9),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn top_edge_tab_points_up_and_outside() {
        // Edge along y = 0 of a square that lies at y >= 0.
        let outline = square();
        let resolver = TabResolver::new(&outline, false);
        let (t1, t2) = resolver.resolve(&outline[0], &outline[1], &spec());
        assert_abs_diff_eq!(t1.x, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t1.y, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t2.x, 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t2.y, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn bottom_edge_tab_is_mirrored_outside() {
        let outline = square();
        let resolver = TabResolver::new(&outline, false);
        let (t1, t2) = resolver.resolve(&outline[2], &outline[3], &spec());
        assert_abs_diff_eq!(t1.y, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t2.y, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t1.x, 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t2.x, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn vertical_edges_both_sides() {
        let outline = square();
        let resolver = TabResolver::new(&outline, false);
        let (r1, r2) = resolver.resolve(&outline[1], &outline[2], &spec());
        assert_abs_diff_eq!(r1.x, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(r2.x, 4.5, epsilon = 1e-9);
        let (l1, l2) = resolver.resolve(&outline[3], &outline[0], &spec());
        assert_abs_diff_eq!(l1.x, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(l2.x, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(l1.y, 3.5, epsilon = 1e-9);
    }

    #[test]
    fn enclosed_outline_puts_tab_inside() {
        let outline = square();
        let resolver = TabResolver::new(&outline, true);
        let (t1, t2) = resolver.resolve(&outline[0], &outline[1], &spec());
        assert!(point_in_polygon(&outline, &t1, true));
        assert!(point_in_polygon(&outline, &t2, true));
    }

    #[test]
    fn oblique_edge_tab_is_outside_and_at_height() {
        let outline = vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)];
        let resolver = TabResolver::new(&outline, false);
        let (t1, t2) = resolver.resolve(&outline[1], &outline[2], &spec());
        assert!(!point_in_polygon(&outline, &t1, true));
        assert!(!point_in_polygon(&outline, &t2, true));
        // Distance from the hypotenuse x + y = 4 equals the tab height.
        let dist = |q: &Point2| (q.x + q.y - 4.0).abs() / 2.0_f64.sqrt();
        assert_abs_diff_eq!(dist(&t1), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(dist(&t2), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn tabs_are_never_degenerate() {
        let outline = vec![p(0.0, 0.0), p(3.0, -1.0), p(5.0, 2.0), p(1.0, 4.0)];
        let n = outline.len();
        let resolver = TabResolver::new(&outline, false);
        for angle in [1.0, 20.0, 45.0, 70.0, 88.5] {
            for i in 0..n {
                let a = outline[i];
                let b = outline[(i + 1) % n];
                let (t1, t2) = resolver.resolve(&a, &b, &TabSpec::new(0.3, angle));
                for (u, v) in [(t1, t2), (t1, a), (t1, b), (t2, a), (t2, b)] {
                    assert!((u - v).norm() > 1e-9, "angle {angle} edge {i}");
                }
            }
        }
    }

    #[test]
    fn short_edge_backs_off_until_legs_clear() {
        // A 0.5 long edge with a 1.0 tab at 45° would cross its own legs.
        let outline = vec![p(0.0, 0.0), p(0.5, 0.0), p(0.5, 5.0), p(0.0, 5.0)];
        let resolver = TabResolver::new(&outline, false);
        let (t1, t2) = resolver.resolve(&outline[0], &outline[1], &TabSpec::new(1.0, 45.0));
        assert!(!segments_intersect(&outline[0], &t1, &outline[1], &t2));
        assert!(t1.y < 0.0 && t2.y < 0.0);
    }

    #[test]
    fn backoff_is_one_directional() {
        let requested = TabSpec::new(1.0, 86.0);
        let mut state = Backoff::TryAngle(requested.angle);
        let mut seen = vec![state];
        while state != Backoff::GiveUp {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                Backoff::TryAngle(86.0),
                Backoff::TryAngle(87.0),
                Backoff::TryAngle(88.0),
                Backoff::TryHeight(1),
                Backoff::TryHeight(2),
                Backoff::TryHeight(3),
                Backoff::TryHeight(4),
                Backoff::GiveUp,
            ]
        );
        assert_abs_diff_eq!(
            Backoff::TryHeight(2).spec(&requested).height,
            0.6,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(Backoff::TryHeight(2).spec(&requested).angle, 86.0);
        assert_eq!(Backoff::GiveUp.spec(&requested), requested);
    }

    #[test]
    fn scaled_spec() {
        let s = TabSpec::new(0.25, 45.0).scaled(0.5);
        assert_abs_diff_eq!(s.height, 0.125);
        assert_abs_diff_eq!(s.angle, 22.5);
    }
}

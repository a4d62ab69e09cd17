use crate::config::ChimneyConfig;
use crate::math::triangle::{hypotenuse_from_legs, opposite_from_adjacent};
use crate::math::{approx_eq, same_point, Point2};

use super::Layout;

/// Outline length, closing point included, of a chimney across the ridge.
const STRADDLING_POINTS: usize = 15;

/// The unfolded chimney and the template for its roof opening.
///
/// The four walls are laid side by side along `x` (back, side, front, side),
/// the top edge on `y = 0` and the bottom edge cut to the roof slope. A
/// chimney that straddles the ridge has a kinked bottom edge on its sides.
#[derive(Debug, Clone, PartialEq)]
pub struct ChimneyLayout {
    pub body: Layout,
    pub hole: Layout,
    /// Whether the chimney has depth on both sides of the ridge.
    pub straddles_ridge: bool,
}

impl ChimneyLayout {
    /// Builds the chimney for a roof slope of `pitch` degrees.
    #[must_use]
    pub fn new(cfg: &ChimneyConfig, pitch: f64) -> Self {
        let (h, w, d) = (cfg.height, cfg.width, cfg.depth);
        let front_run = cfg.off_center * d;
        let back_run = d - front_run;
        let front_rise = opposite_from_adjacent(front_run, pitch);
        let back_rise = opposite_from_adjacent(back_run, pitch);

        let xs = [
            0.0,
            back_run,
            d,
            d + w,
            w + 2.0 * d - back_run,
            2.0 * d + w,
            2.0 * (d + w),
        ];
        let ys = [
            h + back_rise,
            h,
            h + front_rise,
            h + front_rise,
            h,
            h + back_rise,
            h + back_rise,
        ];

        let mut outline = vec![Point2::new(0.0, 0.0)];
        for &x in &xs[1..] {
            if !approx_eq(x, last_x(&outline)) {
                outline.push(Point2::new(x, 0.0));
            }
        }
        for (&x, &y) in xs.iter().zip(&ys).rev() {
            let next = Point2::new(x, y);
            if !outline.last().is_some_and(|p| same_point(p, &next)) {
                outline.push(next);
            }
        }
        outline.push(Point2::new(0.0, 0.0));
        // A slant too short to survive the dedup leaves a one-slope outline.
        let straddles_ridge = outline.len() == STRADDLING_POINTS;

        let body = if straddles_ridge {
            Layout {
                tabs: (7..=13).collect(),
                scores: vec![(2, 11), (3, 10), (5, 8)],
                deco_scores: vec![(2, 11), (3, 10), (5, 8)],
                ..Layout::new(outline)
            }
        } else {
            Layout {
                tabs: (5..=9).collect(),
                scores: vec![(1, 8), (2, 7), (3, 6)],
                deco_scores: vec![(1, 8), (2, 7), (3, 6)],
                ..Layout::new(outline)
            }
        };

        let front_slant = hypotenuse_from_legs(front_rise, front_run);
        let back_slant = hypotenuse_from_legs(back_rise, back_run);
        // The ridge crosses the opening only when the chimney straddles it.
        let mut hole = vec![Point2::new(0.0, 0.0)];
        if straddles_ridge {
            hole.push(Point2::new(back_slant, 0.0));
        }
        hole.push(Point2::new(back_slant + front_slant, 0.0));
        hole.push(Point2::new(back_slant + front_slant, w));
        if straddles_ridge {
            hole.push(Point2::new(back_slant, w));
        }
        hole.push(Point2::new(0.0, w));
        hole.push(Point2::new(0.0, 0.0));
        let mut hole = Layout::new(hole);
        if straddles_ridge {
            hole.scores.push((1, 4));
        }

        Self {
            body,
            hole,
            straddles_ridge,
        }
    }
}

fn last_x(outline: &[Point2]) -> f64 {
    outline.last().map_or(0.0, |p| p.x)
}

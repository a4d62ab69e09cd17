//! Dormer pieces: the front with its window, the side band that wraps the
//! front profile and meets the roof, and the template for the roof opening.
//!
//! The front profile is drawn with the bottom of the rectangular base at
//! `y = base_height` and the bottom of the curved top at `y = 0`, so the
//! curve rises into negative `y`.

use crate::config::DormerConfig;
use crate::geometry::Ellipse;
use crate::math::distance_2d::distance;
use crate::math::triangle::{adjacent_from_opposite, hypotenuse_from_adjacent};
use crate::math::{approx_eq, Point2};
use crate::operations::ScorePair;

use super::Layout;

/// All outlines of one dormer.
#[derive(Debug, Clone, PartialEq)]
pub struct DormerLayout {
    /// Front with stick-out flap, tabbed on every edge.
    pub front: Layout,
    /// Front profile without stick-out; the window is inset from it.
    pub window: Vec<Point2>,
    /// Opening cut into the roof, the profile stretched along the slope.
    pub hole: Vec<Point2>,
    /// Band wrapping the profile; `deco_scores` mark the top of the curve.
    pub side: Layout,
}

impl DormerLayout {
    /// Builds every dormer outline for a roof slope of `pitch` degrees.
    #[must_use]
    pub fn new(cfg: &DormerConfig, pitch: f64) -> Self {
        let profile = front_profile(cfg);
        Self {
            front: front(cfg, &profile),
            window: profile.clone(),
            hole: hole(cfg, &profile, pitch),
            side: if has_top(cfg) {
                side_band(cfg, &profile, pitch)
            } else {
                flat_side(cfg, pitch)
            },
        }
    }
}

fn has_top(cfg: &DormerConfig) -> bool {
    !approx_eq(cfg.top_height, 0.0)
}

fn has_base(cfg: &DormerConfig) -> bool {
    !approx_eq(cfg.base_height(), 0.0)
}

/// Outline of the dormer front, starting at the lower right corner.
///
/// With a base the profile is the base's bottom edge followed by the curved
/// top from left to right; without one it is the curved top alone. A flat
/// top gives the plain base rectangle.
#[must_use]
pub fn front_profile(cfg: &DormerConfig) -> Vec<Point2> {
    let w = cfg.width / 2.0;
    let bh = cfg.base_height();
    if !has_top(cfg) {
        return vec![
            Point2::new(w, bh),
            Point2::new(-w, bh),
            Point2::new(-w, 0.0),
            Point2::new(w, 0.0),
        ];
    }
    let top = Ellipse::new(w, cfg.top_height).dormer_top(cfg.sides);
    if has_base(cfg) {
        let mut profile = Vec::with_capacity(top.len() + 2);
        profile.push(Point2::new(w, bh));
        profile.push(Point2::new(-w, bh));
        profile.extend(top);
        profile
    } else {
        top
    }
}

fn front(cfg: &DormerConfig, profile: &[Point2]) -> Layout {
    let w = cfg.width / 2.0;
    let bh = cfg.base_height();
    let mut outline = profile.to_vec();
    let mut scores = Vec::new();
    if cfg.stickout > 0.0 {
        let flap = bh + cfg.stickout;
        if has_base(cfg) {
            outline.insert(1, Point2::new(w, flap));
            outline.insert(2, Point2::new(-w, flap));
            scores.push((0, 3));
        } else {
            outline.insert(0, Point2::new(w, flap));
            outline.insert(1, Point2::new(-w, flap));
            scores.push((outline.len() - 1, 2));
        }
    }
    Layout {
        tabs: (1..outline.len()).collect(),
        scores,
        ..Layout::new(outline)
    }
}

/// Profile stretched by `1 / sin(pitch)` above the base line, closed.
fn hole(cfg: &DormerConfig, profile: &[Point2], pitch: f64) -> Vec<Point2> {
    let bh = cfg.base_height();
    let mut hole: Vec<Point2> = profile
        .iter()
        .map(|p| {
            let rise = bh - p.y;
            if approx_eq(rise, 0.0) {
                *p
            } else {
                Point2::new(p.x, bh - hypotenuse_from_adjacent(rise, 90.0 - pitch))
            }
        })
        .collect();
    if let Some(&first) = hole.first() {
        hole.push(first);
    }
    hole
}

/// Side band of a curved dormer.
///
/// The band is the strip of the front's perimeter (base sides and curve)
/// unrolled along `y`. Its right edge follows where each profile vertex meets
/// the roof, at depth `rise / tan(pitch)`; its left edge is straight, pushed
/// out by the stick-out.
fn side_band(cfg: &DormerConfig, profile: &[Point2], pitch: f64) -> Layout {
    let bh = cfg.base_height();
    let stickout = cfg.stickout > 0.0;
    let base = has_base(cfg);

    // Perimeter walked from the lower left corner over the top.
    let walk: Vec<Point2> = if base {
        profile[1..]
            .iter()
            .copied()
            .chain(std::iter::once(profile[0]))
            .collect()
    } else {
        profile.to_vec()
    };
    let m = walk.len();

    let mut y = if base { bh } else { 0.0 };
    let mut band_y = Vec::with_capacity(m);
    band_y.push(y);
    for pair in walk.windows(2) {
        y -= distance(&pair[0], &pair[1]);
        band_y.push(y);
    }

    let mut outline: Vec<Point2> = walk
        .iter()
        .zip(&band_y)
        .enumerate()
        .map(|(k, (p, &by))| {
            let depth = if k == 0 {
                0.0
            } else {
                adjacent_from_opposite(bh - p.y, pitch)
            };
            Point2::new(depth, by)
        })
        .collect();

    let left_x = if stickout { -cfg.stickout } else { 0.0 };
    if stickout {
        outline.push(Point2::new(left_x, band_y[m - 1]));
    }
    let lowest_left = usize::from(!stickout);
    for k in (lowest_left..m - 1).rev() {
        outline.push(Point2::new(left_x, band_y[k]));
    }

    let span = if stickout { 2 * m - 1 } else { 2 * m - 2 };
    let partner = |i: usize| span - i;
    let last_scored = if stickout { m - 1 } else { m - 2 };
    let scores: Vec<ScorePair> = (1..=last_scored).map(|i| (i, partner(i))).collect();

    let crest = cfg.sides / 2 + usize::from(base);
    let mut deco_scores = vec![(crest, partner(crest))];
    if cfg.sides % 2 == 1 {
        deco_scores.push((crest + 1, partner(crest + 1)));
    }

    Layout {
        outline,
        tabs: (1..m).collect(),
        scores,
        deco_scores,
    }
}

/// Side band of a flat-topped dormer: base height, width, base height.
fn flat_side(cfg: &DormerConfig, pitch: f64) -> Layout {
    let bh = cfg.base_height();
    let w = cfg.width;
    let depth = adjacent_from_opposite(bh, pitch);
    let mut outline = vec![
        Point2::new(0.0, 0.0),
        Point2::new(depth, bh),
        Point2::new(depth, bh + w),
        Point2::new(0.0, 2.0 * bh + w),
    ];
    let scores = if cfg.stickout > 0.0 {
        let x = -cfg.stickout;
        outline.extend([
            Point2::new(x, 2.0 * bh + w),
            Point2::new(x, bh + w),
            Point2::new(x, bh),
            Point2::new(x, 0.0),
        ]);
        vec![(1, 6), (2, 5)]
    } else {
        outline.extend([Point2::new(0.0, bh + w), Point2::new(0.0, bh)]);
        vec![(1, 5), (2, 4)]
    };
    Layout {
        outline,
        tabs: vec![1, 2, 3],
        deco_scores: scores.clone(),
        scores,
    }
}
